// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: turn a LiDAR room capture into the `LidarData` payload
//!
//! Usage:
//!   roomscan <capture.json> [--output PATH] [--pretty]
//!   roomscan --demo [--output PATH] [--pretty]

mod config;

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use roomscan_payload::units::{format_area, format_dimensions};
use roomscan_payload::LidarData;
use roomscan_spatial::{CapturedRoom, RoomScanData};

use config::CliConfig;

#[derive(Debug, Default, PartialEq)]
struct Args {
    capture_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    demo: bool,
    pretty: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => parsed.help = true,
            "--demo" => parsed.demo = true,
            "--pretty" => parsed.pretty = true,
            "--output" | "-o" => {
                i += 1;
                let path = args.get(i).context("--output needs a path")?;
                parsed.output_path = Some(PathBuf::from(path));
            }
            other if other.starts_with('-') => bail!("Unknown option: {}", other),
            path => {
                if parsed.capture_path.is_some() {
                    bail!("Only one capture file may be given");
                }
                parsed.capture_path = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    if !parsed.help && !parsed.demo && parsed.capture_path.is_none() {
        bail!("Missing capture file");
    }

    Ok(parsed)
}

fn print_usage() {
    eprintln!("Usage: roomscan <capture.json> [options]");
    eprintln!("       roomscan --demo [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output PATH   Write the payload to PATH instead of stdout");
    eprintln!("      --demo          Emit the demo room payload without reading a capture");
    eprintln!("      --pretty        Pretty-print the JSON");
    eprintln!("  -h, --help          Show this message");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ROOMSCAN_ATTACHMENT_THRESHOLD   Max wall distance in metres (default 1.0)");
    eprintln!("  ROOMSCAN_AREA_SOURCE            footprint | first_wall (default footprint)");
    eprintln!("  ROOMSCAN_PARALLEL               Parallel surface extraction (default true)");
    eprintln!("  RUST_LOG                        Log filter (default info,roomscan_spatial=debug)");
}

fn build_payload(args: &Args, config: &CliConfig) -> Result<LidarData> {
    let Some(path) = args.capture_path.as_ref().filter(|_| !args.demo) else {
        return Ok(LidarData::demo());
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read capture {}", path.display()))?;
    let capture = CapturedRoom::from_json(&json)
        .with_context(|| format!("Failed to parse capture {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        surfaces = capture.surface_count(),
        "Loaded capture"
    );

    let scan = RoomScanData::from_capture(capture, &config.spatial);
    let data = scan.spatial_data();

    tracing::info!(
        description = scan.room_description(),
        imperial = %format_dimensions(scan.dimensions()),
        floor = %format_area(scan.dimensions().area()),
        relationships = data.surface_relationships.len(),
        orphaned = data.elements().filter(|e| !e.is_attached()).count(),
        "Room scan summary"
    );

    Ok(LidarData::from_scan(&scan))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,roomscan_spatial=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            std::process::exit(1);
        }
    };

    if args.help {
        print_usage();
        return Ok(());
    }

    let config = CliConfig::from_env();
    config
        .spatial
        .validate()
        .context("Invalid spatial configuration")?;

    let payload = build_payload(&args, &config)?;
    let json = if args.pretty {
        payload.to_json_pretty()?
    } else {
        payload.to_json()?
    };

    match &args.output_path {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Wrote payload");
        }
        None => println!("{json}"),
    }

    Ok(())
}
