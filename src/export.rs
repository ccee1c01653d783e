//! CSV export for decoded FPV logs
//!
//! The column schema is fixed for compatibility with downstream flight-log
//! tooling. The decoder fills position, altitude, running max altitude, and
//! the timestamp columns; the derived-metric columns (ascent, speed,
//! distance, pressure, temperature, ...) belong to external collaborators
//! and are written as zero.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::types::FpvLog;

/// Timestamp rendering used for both datetime columns
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Column schema expected by downstream consumers, in order
pub const CSV_FIELDS: [&str; 16] = [
    "latitude",
    "longitude",
    "altitude(feet)",
    "ascent(feet)",
    "speed(mph)",
    "distance(feet)",
    "max_altitude(feet)",
    "max_ascent(feet)",
    "max_speed(mph)",
    "max_distance(feet)",
    "time(millisecond)",
    "datetime(utc)",
    "datetime(local)",
    "satellites",
    "pressure(Pa)",
    "temperature(F)",
];

/// Export options for controlling output
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub csv: bool,
    pub output_dir: Option<String>,
}

/// Results of an export operation
#[derive(Debug)]
pub struct ExportReport {
    pub csv_path: Option<PathBuf>,
    pub fixes_written: usize,
}

/// Compute the CSV output path for an input file: `<stem>.csv` next to the
/// input, or under `output_dir` when set
pub fn compute_csv_path(input_path: &Path, options: &ExportOptions) -> PathBuf {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let file_name = format!("{stem}.csv");
    match &options.output_dir {
        Some(dir) => Path::new(dir).join(file_name),
        None => input_path.with_file_name(file_name),
    }
}

/// Export a decoded log to CSV format
pub fn export_to_csv(
    log: &FpvLog,
    input_path: &Path,
    options: &ExportOptions,
) -> Result<ExportReport> {
    if !options.csv {
        return Ok(ExportReport {
            csv_path: None,
            fixes_written: 0,
        });
    }

    let csv_path = compute_csv_path(input_path, options);
    let mut writer = csv::Writer::from_path(&csv_path)
        .with_context(|| format!("Failed to create CSV file: {:?}", csv_path))?;

    writer.write_record(CSV_FIELDS)?;

    for fix in &log.fixes {
        let datetime = fix.timestamp.format(DATETIME_FORMAT).to_string();
        writer.write_record(&[
            fix.latitude.to_string(),
            fix.longitude.to_string(),
            fix.altitude_ft.to_string(),
            "0".to_string(),
            "0".to_string(),
            "0".to_string(),
            fix.max_altitude_ft.to_string(),
            "0".to_string(),
            "0".to_string(),
            "0".to_string(),
            "0".to_string(),
            datetime.clone(),
            datetime,
            "0".to_string(),
            "0".to_string(),
            "0".to_string(),
        ])?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file: {:?}", csv_path))?;

    Ok(ExportReport {
        csv_path: Some(csv_path),
        fixes_written: log.fixes.len(),
    })
}
