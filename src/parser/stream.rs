//! Byte-stream framing for FPV telemetry logs
//!
//! An FPV log is a 46-byte file header followed by packets of the form
//! `55AA <type> <len> <payload> <checksum x2>`. The stream is untrusted:
//! framing recovers from corruption by scanning byte-at-a-time for the
//! next magic word, and a candidate header is only accepted if another
//! magic word sits where the next packet should start.

/// Two-byte magic word that opens every packet
pub const PACKET_MAGIC: u16 = 0x55AA;

/// Offset of the first packet past the fixed file header
pub const FIRST_PACKET_OFFSET: usize = 46;

/// Message type carrying a GPS fix record
pub const MSG_TYPE_FIX: u8 = 0x10;

/// Payload length of a fix record
pub const FIX_RECORD_LEN: usize = 58;

/// Trailing checksum bytes, framed around but never verified
pub const CHECKSUM_LEN: usize = 2;

/// Framed packet boundaries, produced per iteration and consumed immediately
#[derive(Debug, Clone, Copy)]
pub struct PacketHeader {
    pub message_type: u8,
    pub length: u8,
    pub start_offset: usize,
    pub payload_offset: usize,
}

impl PacketHeader {
    /// Offset just past this packet's payload and checksum, where the next
    /// header is expected
    pub fn next_offset(&self) -> usize {
        self.payload_offset + self.length as usize + CHECKSUM_LEN
    }
}

/// FPV data stream: an immutable byte buffer plus a cursor.
///
/// Owned by the framer for the duration of one decode pass. The buffer is
/// never mutated, only the cursor advances.
pub struct RawStream<'a> {
    data: &'a [u8],
    pub pos: usize,
    end: usize,
}

impl<'a> RawStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: FIRST_PACKET_OFFSET,
            end: data.len(),
        }
    }

    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Scan forward from the cursor to the next verifiable packet header.
    ///
    /// Invalid magic advances the cursor one byte at a time. A magic match
    /// is only trusted if a second magic word is found at the computed
    /// next-packet offset; otherwise the candidate is spurious and scanning
    /// falls through to the next iteration with the cursor resting just
    /// past the candidate's 4 header bytes (so the rescan covers the
    /// candidate's own payload). Returns `None` once fewer than 4 scannable
    /// bytes remain or the next-header position would run past the buffer.
    pub fn next_packet(&mut self) -> Option<PacketHeader> {
        loop {
            if self.pos + 4 >= self.end {
                return None;
            }

            if read_u16_be(self.data, self.pos) != PACKET_MAGIC {
                self.pos += 1;
                continue;
            }

            let header = PacketHeader {
                message_type: self.data[self.pos + 2],
                length: self.data[self.pos + 3],
                start_offset: self.pos,
                payload_offset: self.pos + 4,
            };
            self.pos = header.payload_offset;

            let next_offset = header.next_offset();
            if next_offset + 2 >= self.end {
                return None;
            }
            if read_u16_be(self.data, next_offset) != PACKET_MAGIC {
                continue;
            }

            return Some(header);
        }
    }
}

fn read_u16_be(data: &[u8], pos: usize) -> u16 {
    u16::from_be_bytes([data[pos], data[pos + 1]])
}

/// Reverse byte order and XOR every byte with `mask`.
///
/// This is the transform the logger applies to multi-byte fields, and it is
/// self-inverse: applying it twice with the same mask restores the input.
pub fn de_obfuscate(data: &[u8], mask: u8) -> Vec<u8> {
    data.iter().rev().map(|b| b ^ mask).collect()
}

/// Read a big-endian i32 field after de-obfuscation, advancing `offset`
pub fn read_masked_i32(payload: &[u8], offset: &mut usize, mask: u8) -> i32 {
    let b = de_obfuscate(&payload[*offset..*offset + 4], mask);
    *offset += 4;
    i32::from_be_bytes([b[0], b[1], b[2], b[3]])
}

/// Read a big-endian i16 field after de-obfuscation, advancing `offset`
pub fn read_masked_i16(payload: &[u8], offset: &mut usize, mask: u8) -> i16 {
    let b = de_obfuscate(&payload[*offset..*offset + 2], mask);
    *offset += 2;
    i16::from_be_bytes([b[0], b[1]])
}

/// Read a big-endian u16 field after de-obfuscation, advancing `offset`
pub fn read_masked_u16(payload: &[u8], offset: &mut usize, mask: u8) -> u16 {
    let b = de_obfuscate(&payload[*offset..*offset + 2], mask);
    *offset += 2;
    u16::from_be_bytes([b[0], b[1]])
}
