use std::path::Path;

use anyhow::{Context, Result};

use crate::conversion::meters_to_feet;
use crate::parser::fix::decode_fix;
use crate::parser::interpolate::MsInterpolator;
use crate::parser::stream::{RawStream, CHECKSUM_LEN, FIX_RECORD_LEN, MSG_TYPE_FIX};
use crate::types::{DecodeStats, Fix, FpvLog};

/// Caller-supplied options for one decode pass
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Add 16 hours to every decoded timestamp. For loggers whose clock has
    /// no AM/PM disambiguation, when the flight is known to occur at night.
    pub force_night: bool,
}

/// Parse an FPV log file into a sequence of GPS fixes
pub fn parse_fpv_file(file_path: &Path, options: &DecodeOptions, debug: bool) -> Result<FpvLog> {
    if debug {
        println!("=== PARSING FPV FILE ===");
        let metadata = std::fs::metadata(file_path)?;
        println!("File size: {} bytes", metadata.len());
    }

    let file_data = std::fs::read(file_path)
        .with_context(|| format!("Failed to read FPV file: {:?}", file_path))?;

    parse_fpv_bytes(&file_data, options, debug)
}

/// Parse FPV log data from memory.
///
/// One sequential pass: frame packets, decode `0x10` fix records, thread the
/// running maximum altitude, and interpolate sub-second offsets. All mutable
/// state lives in this call, so independent buffers can be decoded
/// concurrently. Malformed content degrades to fewer fixes rather than an
/// error.
pub fn parse_fpv_bytes(data: &[u8], options: &DecodeOptions, debug: bool) -> Result<FpvLog> {
    let mut stream = RawStream::new(data);
    let mut fixes: Vec<Fix> = Vec::new();
    let mut interpolator = MsInterpolator::new();
    let mut stats = DecodeStats::default();
    let mut max_altitude_m = 0.0f64;

    while let Some(packet) = stream.next_packet() {
        stats.total_packets += 1;

        if packet.message_type != MSG_TYPE_FIX {
            stats.other_packets += 1;
            stream.seek(packet.next_offset());
            continue;
        }

        stats.fix_packets += 1;

        // A fix record is a fixed 58 bytes regardless of the length byte;
        // the cursor advances past the record and its checksum.
        let payload_end = packet.payload_offset + FIX_RECORD_LEN;
        if payload_end > data.len() {
            stats.truncated_packets += 1;
            stream.seek(packet.next_offset());
            continue;
        }
        stream.seek(payload_end + CHECKSUM_LEN);

        let record = match decode_fix(
            &data[packet.payload_offset..payload_end],
            options.force_night,
            debug,
        ) {
            Some(record) => record,
            None => {
                stats.invalid_timestamps += 1;
                continue;
            }
        };

        // Vertical accuracy <= 0 marks a record with no reliable fix. It
        // decodes normally but is excluded from output and does not move
        // the running maximum.
        if record.vertical_accuracy <= 0 {
            stats.unreliable_fixes += 1;
            continue;
        }

        if record.altitude_m > max_altitude_m {
            max_altitude_m = record.altitude_m;
        }

        fixes.push(Fix {
            timestamp: record.timestamp,
            latitude: record.latitude,
            longitude: record.longitude,
            altitude_ft: meters_to_feet(record.altitude_m),
            max_altitude_ft: meters_to_feet(max_altitude_m),
            horizontal_accuracy: record.horizontal_accuracy,
            vertical_accuracy: record.vertical_accuracy,
            north_vel: record.north_vel,
            east_vel: record.east_vel,
            down_vel: record.down_vel,
            position_dop: record.position_dop,
            vertical_dop: record.vertical_dop,
            northing_dop: record.northing_dop,
            easting_dop: record.easting_dop,
            satellite_count: record.satellite_count,
            fix_type: record.fix_type,
            sequence: record.sequence,
        });
        let index = fixes.len() - 1;
        interpolator.record(&mut fixes, index);
    }

    if debug {
        println!(
            "Decoded {} fixes from {} packets ({} fix packets, {} other, {} invalid timestamps, {} unreliable, {} truncated)",
            fixes.len(),
            stats.total_packets,
            stats.fix_packets,
            stats.other_packets,
            stats.invalid_timestamps,
            stats.unreliable_fixes,
            stats.truncated_packets,
        );
    }

    Ok(FpvLog { fixes, stats })
}
