//! CLI binary for FPV Parser
//!
//! This provides the command-line interface for the FPV parser library.

use anyhow::Result;
use clap::{Arg, Command};
use fpv_parser::{export_to_csv, parse_fpv_file, DecodeOptions, ExportOptions};
use glob::glob;
use std::path::Path;

fn main() -> Result<()> {
    let matches = Command::new("FPV Parser")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read and parse FlyTrex FPV telemetry log files. Output decoded GPS fixes to CSV.")
        .arg(
            Arg::new("files")
                .help("FPV files to parse (.FPV extension, case-insensitive, supports globbing)")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed parsing information")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("force-night")
                .long("force-night")
                .help("Add 16 hours to decoded timestamps, for night flights logged by a clock without AM/PM disambiguation")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Export decoded GPS fixes to a .csv file per input")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for CSV output files (default: same as input file)")
                .value_name("DIR"),
        )
        .get_matches();

    let debug = matches.get_flag("debug");
    let decode_options = DecodeOptions {
        force_night: matches.get_flag("force-night"),
    };
    let export_options = ExportOptions {
        csv: matches.get_flag("csv"),
        output_dir: matches.get_one::<String>("output-dir").cloned(),
    };
    let file_patterns: Vec<&String> = matches.get_many::<String>("files").unwrap().collect();

    if debug {
        println!("Input patterns: {file_patterns:?}");
    }

    // Collect all valid file paths
    let mut valid_paths = Vec::new();
    for pattern in &file_patterns {
        if debug {
            println!("Processing pattern: {pattern}");
        }

        let paths: Vec<_> = if pattern.contains('*') || pattern.contains('?') {
            match glob(pattern) {
                Ok(glob_iter) => {
                    let collected = glob_iter.collect::<Result<Vec<_>, _>>();
                    match collected {
                        Ok(paths) => {
                            if debug {
                                println!("Glob pattern '{pattern}' matched {} files", paths.len());
                            }
                            paths
                        }
                        Err(e) => {
                            eprintln!("Error expanding glob pattern '{pattern}': {e}");
                            continue;
                        }
                    }
                }
                Err(e) => {
                    eprintln!("Invalid glob pattern '{pattern}': {e}");
                    continue;
                }
            }
        } else {
            vec![Path::new(pattern).to_path_buf()]
        };

        for path in paths {
            if !path.exists() {
                eprintln!("Warning: File does not exist: {path:?}");
                continue;
            }

            let valid_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("fpv"))
                .unwrap_or(false);

            if !valid_extension {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("none");
                eprintln!("Warning: Skipping file with unsupported extension '{ext}': {path:?}");
                continue;
            }

            valid_paths.push(path);
        }
    }

    if valid_paths.is_empty() {
        eprintln!("Error: No valid files found to process.");
        eprintln!("Supported extension: .FPV (case-insensitive)");
        eprintln!("Input patterns were: {file_patterns:?}");
        std::process::exit(1);
    }

    let mut processed_files = 0;

    // Each file gets its own decode pass with independent state
    for (index, path) in valid_paths.iter().enumerate() {
        if index > 0 {
            println!();
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        println!("Processing: {filename}");

        match parse_fpv_file(path, &decode_options, debug) {
            Ok(log) => {
                println!(
                    "Decoded {} fixes ({} packets framed, {} invalid timestamps, {} unreliable)",
                    log.fixes.len(),
                    log.stats.total_packets,
                    log.stats.invalid_timestamps,
                    log.stats.unreliable_fixes
                );
                if log.has_fixes() {
                    println!(
                        "Flight duration: {:.1} s, max altitude: {:.1} ft",
                        log.duration_seconds(),
                        log.max_altitude_ft()
                    );
                }

                match export_to_csv(&log, path, &export_options) {
                    Ok(report) => {
                        if let Some(csv_path) = report.csv_path {
                            println!(
                                "Exported {} fixes to: {}",
                                report.fixes_written,
                                csv_path.display()
                            );
                        }
                    }
                    Err(e) => {
                        eprintln!("Error exporting {filename}: {e}");
                    }
                }

                processed_files += 1;
            }
            Err(e) => {
                eprintln!("Error processing {filename}: {e}");
                eprintln!("Continuing with next file...");
            }
        }
    }

    if processed_files == 0 {
        eprintln!(
            "Error: No files were successfully processed out of {} files found.",
            valid_paths.len()
        );
        eprintln!("Use --debug for more detailed error information.");
        std::process::exit(1);
    }

    Ok(())
}
