use std::fmt;

use chrono::NaiveDateTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// GPS fix quality reported by the logger's receiver.
///
/// Raw codes follow the uBlox NAV-SOL convention observed in the wild;
/// anything outside 0..=5 maps to [`FixType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FixType {
    NoLock,
    DeadReckoning,
    Lock2D,
    Lock3D,
    GpsDeadReckoning,
    TimeOnly,
    Unknown,
}

impl FixType {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => FixType::NoLock,
            1 => FixType::DeadReckoning,
            2 => FixType::Lock2D,
            3 => FixType::Lock3D,
            4 => FixType::GpsDeadReckoning,
            5 => FixType::TimeOnly,
            _ => FixType::Unknown,
        }
    }
}

impl fmt::Display for FixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FixType::NoLock => "No Lock",
            FixType::DeadReckoning => "Dead Reckoning",
            FixType::Lock2D => "2D Lock",
            FixType::Lock3D => "3D Lock",
            FixType::GpsDeadReckoning => "GPS + Dead Reckoning",
            FixType::TimeOnly => "Time Only Fix",
            FixType::Unknown => "Unable to determine fix type",
        };
        write!(f, "{}", name)
    }
}

/// A single decoded GPS fix from a `0x10` telemetry packet.
///
/// The timestamp starts truncated to the second (the logger clock cannot
/// subdivide seconds); the millisecond interpolator may later add a
/// sub-second offset in place. Altitudes are in feet, velocities and
/// accuracies in the receiver's raw units.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fix {
    pub timestamp: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_ft: f64,
    /// Maximum altitude (feet) observed in the stream up to and including
    /// this fix.
    pub max_altitude_ft: f64,
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
    /// Message sequence number. Increases while lock holds; the logger
    /// byte-swaps it after losing lock. Decoded but not used downstream.
    pub sequence: u16,
}
