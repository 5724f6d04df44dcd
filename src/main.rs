//! Command-line front end: estimate a position from a waypoint file
//!
//! Reads a JSON array of waypoints (`lat`, `lng`, `radius`, optional
//! `weight`), runs the engine, and prints the estimate. The waypoint
//! shape matches what map front ends keep per marker.

use std::env;
use std::fs;
use std::process;

use serde::Deserialize;

use weighted_positioning::{
    Beacon, ConfigurationManager, CsvFormatter, EngineOptions, JsonFormatter, PositionEngine,
    TextFormatter,
};

/// Waypoint as map UIs persist it; the circle radius doubles as the
/// measured distance to the target.
#[derive(Debug, Deserialize)]
struct Waypoint {
    #[serde(default)]
    id: Option<u32>,
    lat: f64,
    lng: f64,
    radius: f64,
    #[serde(default)]
    weight: Option<f64>,
}

enum Format {
    Text,
    Json,
    Csv,
}

struct CliArgs {
    waypoint_path: String,
    config_path: Option<String>,
    format: Format,
}

fn parse_args() -> Result<CliArgs, String> {
    let mut waypoint_path = None;
    let mut config_path = None;
    let mut format = Format::Text;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--format" => {
                let value = args.next().ok_or("--format requires a value")?;
                format = match value.as_str() {
                    "text" => Format::Text,
                    "json" => Format::Json,
                    "csv" => Format::Csv,
                    other => return Err(format!("unknown format: {}", other)),
                };
            }
            "--config" => {
                config_path = Some(args.next().ok_or("--config requires a path")?);
            }
            "--help" | "-h" => {
                return Err(usage());
            }
            path if waypoint_path.is_none() => waypoint_path = Some(path.to_string()),
            other => return Err(format!("unexpected argument: {}", other)),
        }
    }

    Ok(CliArgs {
        waypoint_path: waypoint_path.ok_or_else(usage)?,
        config_path,
        format,
    })
}

fn usage() -> String {
    "usage: weighted-positioning <waypoints.json> [--format text|json|csv] [--config options.json]"
        .to_string()
}

fn run(args: CliArgs) -> Result<String, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(&args.waypoint_path)?;
    let waypoints: Vec<Waypoint> = serde_json::from_str(&contents)?;

    let beacons: Vec<Beacon> = waypoints
        .iter()
        .enumerate()
        .map(|(index, wp)| {
            let id = wp.id.map_or_else(|| (index + 1).to_string(), |id| id.to_string());
            match wp.weight {
                Some(weight) => Beacon::with_weight(id, wp.lat, wp.lng, wp.radius, weight),
                None => Beacon::new(id, wp.lat, wp.lng, wp.radius),
            }
        })
        .collect();

    let options = match &args.config_path {
        Some(path) => *ConfigurationManager::from_file(path)?.options(),
        None => EngineOptions::default(),
    };

    let estimate = PositionEngine::with_options(options).compute(&beacons)?;

    let output = match args.format {
        Format::Text => TextFormatter::new().format(&estimate),
        Format::Json => JsonFormatter { pretty: true }.format(&estimate)?,
        Format::Csv => CsvFormatter::new().format(&estimate),
    };
    Ok(output)
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(2);
        }
    };

    match run(args) {
        Ok(output) => println!("{}", output),
        Err(error) => {
            eprintln!("{}", error);
            process::exit(1);
        }
    }
}
