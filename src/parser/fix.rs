//! Fix record decoding for message type `0x10`
//!
//! A fix record is 58 payload bytes with a fixed internal layout. Most
//! fields are obfuscated with an XOR mask that the record itself carries
//! un-obfuscated at payload offset 55; the satellite count and the mask
//! byte are stored in the clear, and the trailing sequence number is only
//! byte-reversed (mask `0x00`). The layout was reconstructed from observed
//! logs; several positions are always zero and are treated as opaque
//! reserved bytes.

use chrono::{NaiveDate, NaiveDateTime};

use crate::conversion::{convert_altitude_m, convert_coordinate};
use crate::parser::stream::{
    de_obfuscate, read_masked_i16, read_masked_i32, read_masked_u16, FIX_RECORD_LEN,
};
use crate::types::FixType;

/// Payload offset of the un-obfuscated XOR mask byte
pub const MASK_OFFSET: usize = 55;

/// One decoded fix record, before unit conversion and interpolation
#[derive(Debug, Clone)]
pub struct FixRecord {
    pub timestamp: NaiveDateTime,
    pub longitude: f64,
    pub latitude: f64,
    pub altitude_m: f64,
    pub horizontal_accuracy: i32,
    pub vertical_accuracy: i32,
    pub north_vel: i32,
    pub east_vel: i32,
    pub down_vel: i32,
    pub position_dop: i16,
    pub vertical_dop: i16,
    pub northing_dop: i16,
    pub easting_dop: i16,
    pub satellite_count: u8,
    pub fix_type: FixType,
    pub sequence: u16,
}

/// Calendar components unpacked from the 32-bit timestamp field
#[derive(Debug, Clone, Copy)]
struct TimeParts {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

impl TimeParts {
    fn to_datetime(self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|d| d.and_hms_opt(self.hour, self.minute, self.second))
    }
}

/// Unpack the bit-packed timestamp field.
///
/// Bits, low to high: second (6), minute (6), hour (4), day (5), month (4),
/// year offset from 2000 (7). Two corrections are applied in order:
/// force-night adds 16 to the hour (the logger clock has no AM/PM), and an
/// hour past 7 bumps the day by one, compensating a clock-skew artifact of
/// the format. The day bump sees the force-night-adjusted hour.
fn unpack_time_parts(packed: i32, force_night: bool) -> TimeParts {
    let mut time = packed;

    let second = (time & 0b0011_1111) as u32;
    time >>= 6;
    let minute = (time & 0b0011_1111) as u32;
    time >>= 6;
    let mut hour = (time & 0b0000_1111) as u32;
    if force_night {
        if hour + 16 > 24 {
            eprintln!(
                "Warning: force-night pushes hour {} past 24; are you sure this flight needs it?",
                hour
            );
        }
        hour += 16;
    }
    time >>= 4;
    let mut day = (time & 0b0001_1111) as u32;
    time >>= 5;
    if hour > 7 {
        day += 1;
    }
    let month = (time & 0b0000_1111) as u32;
    time >>= 4;
    let year = (time & 0b0111_1111) + 2000;

    TimeParts {
        year,
        month,
        day,
        hour,
        minute,
        second,
    }
}

/// Decode one 58-byte fix payload.
///
/// Returns `None` when the packed timestamp does not form a valid calendar
/// date; the packet is dropped and decoding continues with the next one.
/// Reliability filtering (vertical accuracy <= 0) is the caller's concern:
/// such records decode normally and are excluded downstream.
pub fn decode_fix(payload: &[u8], force_night: bool, debug: bool) -> Option<FixRecord> {
    debug_assert!(payload.len() >= FIX_RECORD_LEN);

    // Working mask for every obfuscated field that precedes it in the layout
    let mask = payload[MASK_OFFSET];
    let mut offset = 0;

    let packed = read_masked_i32(payload, &mut offset, mask);
    let parts = unpack_time_parts(packed, force_night);
    let timestamp = match parts.to_datetime() {
        Some(ts) => ts,
        None => {
            eprintln!(
                "Dropping fix packet with invalid timestamp {}-{:02}-{:02} {:02}:{:02}:{:02}",
                parts.year, parts.month, parts.day, parts.hour, parts.minute, parts.second
            );
            return None;
        }
    };

    let longitude = convert_coordinate(read_masked_i32(payload, &mut offset, mask));
    let latitude = convert_coordinate(read_masked_i32(payload, &mut offset, mask));
    let altitude_m = convert_altitude_m(read_masked_i32(payload, &mut offset, mask));
    let horizontal_accuracy = read_masked_i32(payload, &mut offset, mask);
    let vertical_accuracy = read_masked_i32(payload, &mut offset, mask);

    // Always observed as zero, meaning unknown
    let _reserved = read_masked_i32(payload, &mut offset, mask);

    let north_vel = read_masked_i32(payload, &mut offset, mask);
    let east_vel = read_masked_i32(payload, &mut offset, mask);
    let down_vel = read_masked_i32(payload, &mut offset, mask);

    let position_dop = read_masked_i16(payload, &mut offset, mask);
    let vertical_dop = read_masked_i16(payload, &mut offset, mask);
    let northing_dop = read_masked_i16(payload, &mut offset, mask);
    let easting_dop = read_masked_i16(payload, &mut offset, mask);

    // Satellite count is stored in the clear
    let satellite_count = payload[offset];
    offset += 1;

    // Reserved, always observed as zero
    offset += 1;

    let fix_type = FixType::from_raw(de_obfuscate(&payload[offset..offset + 1], mask)[0]);
    offset += 1;

    // Reserved gap: one zero byte, the fix status flags byte, two more zero
    // bytes. None are interpreted.
    offset += 4;

    // The mask byte re-read in sequence order. It would refresh the mask for
    // the rest of the record, but the only field left is the sequence
    // number, which is observed unmasked.
    let _refreshed_mask = payload[offset];
    offset += 1;

    let sequence = read_masked_u16(payload, &mut offset, 0x00);
    debug_assert_eq!(offset, FIX_RECORD_LEN);

    if debug {
        println!(
            "Fix {} lat={:.7} lon={:.7} alt={:.3}m sats={} type={} seq={}",
            timestamp, latitude, longitude, altitude_m, satellite_count, fix_type, sequence
        );
    }

    Some(FixRecord {
        timestamp,
        longitude,
        latitude,
        altitude_m,
        horizontal_accuracy,
        vertical_accuracy,
        north_vel,
        east_vel,
        down_vel,
        position_dop,
        vertical_dop,
        northing_dop,
        easting_dop,
        satellite_count,
        fix_type,
        sequence,
    })
}
