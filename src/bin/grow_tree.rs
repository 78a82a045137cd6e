//! Batch tree generation utility
//!
//! Grows a personality tree from a profile JSON file (or midpoint defaults)
//! and exports the flattened scene as JSON for external viewers.
//!
//! Usage:
//!     grow_tree [OPTIONS] [OUTPUT_FILE]
//!
//! Options:
//!     -i, --identifier <ID>   Seed identifier (default: guest)
//!     -p, --profile <FILE>    Trait profile JSON file (default: midpoints)
//!     -d, --days <N>          Account age in days (default: 40)
//!     -n, --diaries <N>       Total diary count (default: 45)
//!     -t, --time <0-100>      Time-of-day slider value (default: 50)
//!     -r, --report            Compose the static report scene
//!     -w, --windy             Enable wind in the interactive scene
//!     -h, --help              Show this help message

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;

use psytree::atmosphere::EnvironmentState;
use psytree::core::logging;
use psytree::profile::{TraitProfile, UsageStats};
use psytree::scene::{FlattenedScene, LayerId, Light, Material, TreeScene};

fn print_help() {
    eprintln!("grow_tree - Batch tree generation utility");
    eprintln!();
    eprintln!("Usage: grow_tree [OPTIONS] [OUTPUT_FILE]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    -i, --identifier <ID>   Seed identifier (default: guest)");
    eprintln!("    -p, --profile <FILE>    Trait profile JSON file (default: midpoints)");
    eprintln!("    -d, --days <N>          Account age in days (default: 40)");
    eprintln!("    -n, --diaries <N>       Total diary count (default: 45)");
    eprintln!("    -t, --time <0-100>      Time-of-day slider value (default: 50)");
    eprintln!("    -r, --report            Compose the static report scene");
    eprintln!("    -w, --windy             Enable wind in the interactive scene");
    eprintln!("    -h, --help              Show this help message");
    eprintln!();
    eprintln!("Example:");
    eprintln!("    grow_tree -p profile.json -d 40 -n 45 scene.json");
    eprintln!("    grow_tree -i alice --report report_scene.json");
}

#[derive(Debug)]
struct Args {
    identifier: String,
    profile_file: Option<PathBuf>,
    days: u32,
    diaries: u32,
    time: f32,
    report: bool,
    windy: bool,
    output: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let argv: Vec<String> = env::args().skip(1).collect();

    let mut args = Args {
        identifier: "guest".to_string(),
        profile_file: None,
        days: 40,
        diaries: 45,
        time: 50.0,
        report: false,
        windy: false,
        output: None,
    };

    let mut i = 0;
    while i < argv.len() {
        match argv[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-i" | "--identifier" => {
                i += 1;
                args.identifier = argv
                    .get(i)
                    .ok_or("Missing value for --identifier")?
                    .clone();
            }
            "-p" | "--profile" => {
                i += 1;
                let path = argv.get(i).ok_or("Missing value for --profile")?;
                args.profile_file = Some(PathBuf::from(path));
            }
            "-d" | "--days" => {
                i += 1;
                let value = argv.get(i).ok_or("Missing value for --days")?;
                args.days = value
                    .parse()
                    .map_err(|_| format!("Invalid day count: {value}"))?;
            }
            "-n" | "--diaries" => {
                i += 1;
                let value = argv.get(i).ok_or("Missing value for --diaries")?;
                args.diaries = value
                    .parse()
                    .map_err(|_| format!("Invalid diary count: {value}"))?;
            }
            "-t" | "--time" => {
                i += 1;
                let value = argv.get(i).ok_or("Missing value for --time")?;
                args.time = value
                    .parse()
                    .map_err(|_| format!("Invalid time value: {value}"))?;
            }
            "-r" | "--report" => args.report = true,
            "-w" | "--windy" => args.windy = true,
            other if other.starts_with('-') => {
                return Err(format!("Unknown option: {other}"));
            }
            other => {
                if args.output.is_some() {
                    return Err(format!("Unexpected extra argument: {other}"));
                }
                args.output = Some(PathBuf::from(other));
            }
        }
        i += 1;
    }

    Ok(args)
}

/// Serializable form of one draw entry.
#[derive(Serialize)]
struct MeshExport<'a> {
    layer: LayerId,
    material: Material,
    /// Column-major 4x4 world transform.
    transform: [f32; 16],
    vertices: &'a [psytree::geometry::Vertex],
    indices: &'a [u32],
}

/// Serializable form of one light.
#[derive(Serialize)]
struct LightExport {
    light: Light,
    position: [f32; 3],
}

/// The exported scene document.
#[derive(Serialize)]
struct SceneExport<'a> {
    environment: EnvironmentState,
    meshes: Vec<MeshExport<'a>>,
    lights: Vec<LightExport>,
}

impl<'a> SceneExport<'a> {
    fn from_flattened(environment: EnvironmentState, flat: &'a FlattenedScene) -> Self {
        Self {
            environment,
            meshes: flat
                .meshes
                .iter()
                .map(|m| MeshExport {
                    layer: m.layer,
                    material: m.material,
                    transform: m.world_transform.to_cols_array(),
                    vertices: &m.mesh.vertices,
                    indices: &m.mesh.indices,
                })
                .collect(),
            lights: flat
                .lights
                .iter()
                .map(|l| LightExport {
                    light: l.light,
                    position: l.world_position.to_array(),
                })
                .collect(),
        }
    }
}

fn main() {
    logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    let profile = match &args.profile_file {
        Some(path) => match TraitProfile::from_json_file(path) {
            Ok(profile) => profile,
            Err(err) => {
                eprintln!("Error: failed to load profile {}: {err}", path.display());
                std::process::exit(1);
            }
        },
        None => TraitProfile::default(),
    };
    let usage = UsageStats::new(args.days, args.diaries);

    let start = Instant::now();
    let mut scene = if args.report {
        TreeScene::report(Some(&profile), &args.identifier, &usage)
    } else {
        TreeScene::interactive(Some(&profile), &args.identifier, &usage, args.windy, args.time)
    };
    let flat = scene.flatten();
    log::info!(
        "composed scene for {}: {} draws, {} lights, {} triangles in {:.1}ms",
        args.identifier,
        flat.meshes.len(),
        flat.lights.len(),
        flat.triangle_count(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    if let Some(output) = &args.output {
        let export = SceneExport::from_flattened(*scene.environment(), &flat);
        let json = match serde_json::to_string(&export) {
            Ok(json) => json,
            Err(err) => {
                eprintln!("Error: serialization failed: {err}");
                std::process::exit(1);
            }
        };
        if let Err(err) = std::fs::write(output, json) {
            eprintln!("Error: could not write {}: {err}", output.display());
            std::process::exit(1);
        }
        log::info!("wrote scene to {}", output.display());
    }
}
