use crate::types::Fix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Counters collected over one decode pass
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodeStats {
    /// Packets that passed framing (magic + trailing magic verified)
    pub total_packets: u32,
    /// Framed packets with message type 0x10
    pub fix_packets: u32,
    /// Framed packets of other types, skipped by length
    pub other_packets: u32,
    /// 0x10 packets dropped because the packed timestamp was not a valid
    /// calendar date
    pub invalid_timestamps: u32,
    /// 0x10 packets decoded but excluded (vertical accuracy <= 0)
    pub unreliable_fixes: u32,
    /// 0x10 packets whose payload ran past the end of the buffer
    pub truncated_packets: u32,
}

/// Complete decoded FPV log
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FpvLog {
    pub fixes: Vec<Fix>,
    pub stats: DecodeStats,
}

impl FpvLog {
    /// Check if the decode pass produced any usable fixes
    pub fn has_fixes(&self) -> bool {
        !self.fixes.is_empty()
    }

    /// Flight duration in seconds between the first and last emitted fix
    pub fn duration_seconds(&self) -> f64 {
        match (self.fixes.first(), self.fixes.last()) {
            (Some(first), Some(last)) => {
                (last.timestamp - first.timestamp).num_milliseconds() as f64 / 1000.0
            }
            _ => 0.0,
        }
    }

    /// Maximum altitude in feet over the whole log
    pub fn max_altitude_ft(&self) -> f64 {
        self.fixes.last().map(|f| f.max_altitude_ft).unwrap_or(0.0)
    }
}
