//! Unit conversion utilities for FPV telemetry
//!
//! Raw field units follow the uBlox NAV message family the logger's
//! receiver is based on.

/// Feet per meter, applied to altitudes before they leave the decoder
pub const FEET_PER_METER: f64 = 3.28084;

/// Convert a raw coordinate value to decimal degrees
pub fn convert_coordinate(raw_value: i32) -> f64 {
    // Coordinates are stored as degrees * 10000000
    raw_value as f64 / 10_000_000.0
}

/// Convert a raw altitude value to meters
pub fn convert_altitude_m(raw_value: i32) -> f64 {
    // Altitude is stored in millimeters
    raw_value as f64 / 1000.0
}

/// Convert meters to feet
pub fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}
