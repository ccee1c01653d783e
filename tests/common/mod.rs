//! Shared helpers for building synthetic FPV log buffers.
//!
//! The builder is the inverse of the decoder's wire transform: multi-byte
//! fields are written big-endian, then byte-reversed and XORed with the
//! record mask (the transform is self-inverse).

#![allow(dead_code)]

pub const MAGIC: [u8; 2] = [0x55, 0xAA];
pub const MSG_TYPE_FIX: u8 = 0x10;
pub const FIX_RECORD_LEN: usize = 58;
pub const FILE_HEADER_LEN: usize = 46;
pub const MASK_OFFSET: usize = 55;

/// Field values for one synthetic fix packet
#[derive(Clone)]
pub struct FixParams {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub lon_raw: i32,
    pub lat_raw: i32,
    pub alt_mm: i32,
    pub h_acc: i32,
    pub v_acc: i32,
    pub sats: u8,
    pub fix_type: u8,
    pub mask: u8,
    pub seq: u16,
}

impl Default for FixParams {
    fn default() -> Self {
        Self {
            year: 2024,
            month: 6,
            day: 15,
            hour: 4,
            minute: 0,
            second: 0,
            lon_raw: -1_181_234_567,
            lat_raw: 347_654_321,
            alt_mm: 10_000,
            h_acc: 800,
            v_acc: 1_200,
            sats: 9,
            fix_type: 3,
            mask: 0x5A,
            seq: 0x0102,
        }
    }
}

pub fn pack_timestamp(p: &FixParams) -> i32 {
    let packed = (((p.year - 2000) as u32 & 0x7f) << 25)
        | ((p.month & 0x0f) << 21)
        | ((p.day & 0x1f) << 16)
        | ((p.hour & 0x0f) << 12)
        | ((p.minute & 0x3f) << 6)
        | (p.second & 0x3f);
    packed as i32
}

fn obfuscate(bytes: &[u8], mask: u8) -> Vec<u8> {
    bytes.iter().rev().map(|b| b ^ mask).collect()
}

fn put_i32(payload: &mut [u8], off: usize, value: i32, mask: u8) {
    payload[off..off + 4].copy_from_slice(&obfuscate(&value.to_be_bytes(), mask));
}

fn put_i16(payload: &mut [u8], off: usize, value: i16, mask: u8) {
    payload[off..off + 2].copy_from_slice(&obfuscate(&value.to_be_bytes(), mask));
}

/// Build the 58-byte payload of a fix record
pub fn fix_payload(p: &FixParams) -> Vec<u8> {
    let mut payload = vec![0u8; FIX_RECORD_LEN];
    put_i32(&mut payload, 0, pack_timestamp(p), p.mask);
    put_i32(&mut payload, 4, p.lon_raw, p.mask);
    put_i32(&mut payload, 8, p.lat_raw, p.mask);
    put_i32(&mut payload, 12, p.alt_mm, p.mask);
    put_i32(&mut payload, 16, p.h_acc, p.mask);
    put_i32(&mut payload, 20, p.v_acc, p.mask);
    put_i32(&mut payload, 24, 0, p.mask); // reserved
    put_i32(&mut payload, 28, -35, p.mask); // north velocity
    put_i32(&mut payload, 32, 12, p.mask); // east velocity
    put_i32(&mut payload, 36, 3, p.mask); // down velocity
    put_i16(&mut payload, 40, 180, p.mask); // position DOP
    put_i16(&mut payload, 42, 150, p.mask); // vertical DOP
    put_i16(&mut payload, 44, 120, p.mask); // northing DOP
    put_i16(&mut payload, 46, 130, p.mask); // easting DOP
    payload[48] = p.sats; // stored in the clear
    payload[50] = p.fix_type ^ p.mask;
    payload[MASK_OFFSET] = p.mask;
    // Sequence number: byte-reversed only, never XORed
    payload[56..58].copy_from_slice(&obfuscate(&p.seq.to_be_bytes(), 0x00));
    payload
}

/// Build a complete framed fix packet (magic, type, length, payload,
/// checksum placeholder)
pub fn fix_packet(p: &FixParams) -> Vec<u8> {
    let mut packet = Vec::with_capacity(4 + FIX_RECORD_LEN + 2);
    packet.extend_from_slice(&MAGIC);
    packet.push(MSG_TYPE_FIX);
    packet.push(FIX_RECORD_LEN as u8);
    packet.extend_from_slice(&fix_payload(p));
    packet.extend_from_slice(&[0x00, 0x00]); // checksum, never verified
    packet
}

/// Build a framed packet of an arbitrary non-fix message type
pub fn other_packet(message_type: u8, payload: &[u8]) -> Vec<u8> {
    let mut packet = Vec::with_capacity(4 + payload.len() + 2);
    packet.extend_from_slice(&MAGIC);
    packet.push(message_type);
    packet.push(payload.len() as u8);
    packet.extend_from_slice(payload);
    packet.extend_from_slice(&[0x00, 0x00]);
    packet
}

/// Assemble a full log buffer: 46-byte file header, packets, and a trailing
/// magic word so the last packet's next-header verification can pass
pub fn build_log(packets: &[Vec<u8>]) -> Vec<u8> {
    let mut data = vec![0u8; FILE_HEADER_LEN];
    for packet in packets {
        data.extend_from_slice(packet);
    }
    data.extend_from_slice(&MAGIC);
    data.push(0x00);
    data
}
