//! FPV Parser Library
//!
//! A Rust library for parsing FlyTrex FPV drone telemetry log files.
//! An FPV log is an XOR-obfuscated binary packet stream; this library
//! frames the packets, de-obfuscates the fix records, reconstructs the
//! bit-packed timestamps, and interpolates sub-second offsets for the
//! logger's 4 Hz sampling.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV export functionality
//! - **`cli`** (default): Build the command-line interface binary
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Parse a log file and access the decoded fixes:
//! ```rust,no_run
//! use fpv_parser::{parse_fpv_file, DecodeOptions};
//! use std::path::Path;
//!
//! let options = DecodeOptions::default();
//! let log = parse_fpv_file(Path::new("flight.FPV"), &options, false).unwrap();
//! println!("Decoded {} fixes", log.fixes.len());
//! println!("Max altitude: {:.1} ft", log.max_altitude_ft());
//! ```
//!
//! Export to CSV format:
//! ```rust,no_run
//! use fpv_parser::{parse_fpv_file, export_to_csv, DecodeOptions, ExportOptions};
//! use std::path::Path;
//!
//! let log = parse_fpv_file(Path::new("flight.FPV"), &DecodeOptions::default(), false).unwrap();
//! let export_options = ExportOptions { csv: true, output_dir: None };
//! let report = export_to_csv(&log, Path::new("flight.FPV"), &export_options).unwrap();
//! if let Some(path) = report.csv_path {
//!     println!("Exported to: {}", path.display());
//! }
//! ```
//!
//! # Public API
//!
//! ## Parsing Functions
//! - [`parse_fpv_file`] - Parse an FPV file from disk
//! - [`parse_fpv_bytes`] - Parse FPV data from memory
//!
//! ## Data Types
//! - [`FpvLog`] - Complete decoded log with fixes and decode statistics
//! - [`Fix`] - One GPS fix with position, accuracy, velocity and DOP data
//! - [`FixType`] - GPS lock quality
//! - [`DecodeOptions`] - Decode configuration (force-night)
//! - [`ExportOptions`] - Configuration for export operations
//! - [`ExportReport`] - Results of export operations with output paths
//!
//! ## Export Functions
//! - [`export_to_csv`] - Export decoded fixes to CSV format
//! - [`compute_csv_path`] - Helper for consistent path computation

// Module declarations
pub mod conversion;
pub mod error;
#[cfg(feature = "csv")]
pub mod export;
pub mod parser;
pub mod types;

// Re-export everything from modules for convenience
#[allow(ambiguous_glob_reexports)]
pub use conversion::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[cfg(feature = "csv")]
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;

// Re-export Result type for convenience
pub use anyhow::Result;
