//! heretic-floors: generate and inspect Heretic dungeon floors
//!
//! Builds a floor from a built-in theme or a JSON catalog, prints it as an
//! ASCII map (or JSON), and optionally walks through every room.

mod render;
mod walk;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use thiserror::Error;

use hr_core::errors::{BuildError, ConfigError};
use hr_core::floor::FloorConfig;
use hr_core::runtime::RoomManager;

use render::{LEGEND, render_map};
use walk::{ScriptedHost, walk_floor};

/// Heretic floor generator
#[derive(Parser, Debug)]
#[command(name = "heretic-floors")]
#[command(author, version, about = "Generate Heretic dungeon floors", long_about = None)]
struct Args {
    /// JSON floor catalog to use instead of the built-in themes
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Floor index; picks the theme, the last theme repeats
    #[arg(short = 'f', long = "floor", default_value_t = 0)]
    floor: u32,

    /// Layout seed (0 picks a fresh one)
    #[arg(short = 's', long = "seed", default_value_t = 0)]
    seed: u64,

    /// Built-in theme by name
    #[arg(short = 't', long = "theme", conflicts_with = "config")]
    theme: Option<String>,

    /// Print the placed cells as JSON instead of the map
    #[arg(long = "json")]
    json: bool,

    /// Print the selected catalog as JSON and exit
    #[arg(long = "print-config")]
    print_config: bool,

    /// Walk through every room, clearing each encounter
    #[arg(short = 'w', long = "walk", conflicts_with = "json")]
    walk: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("catalog: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("unknown theme '{name}' (built-in themes: {known})")]
    UnknownTheme { name: String, known: String },

    #[error("JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// RUST_LOG, when set, overrides the level picked by -v
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_themes(args: &Args) -> Result<Vec<FloorConfig>, CliError> {
    if let Some(path) = &args.config {
        return Ok(vec![FloorConfig::load_from_file(path)?]);
    }
    if let Some(name) = &args.theme {
        return hr_data::floor_by_name(name)
            .map(|config| vec![config])
            .ok_or_else(|| CliError::UnknownTheme {
                name: name.clone(),
                known: hr_data::THEME_NAMES.join(", "),
            });
    }
    Ok(hr_data::builtin_floors())
}

fn run(args: &Args) -> Result<(), CliError> {
    let themes = load_themes(args)?;

    if args.print_config {
        let index = (args.floor as usize).min(themes.len().saturating_sub(1));
        if let Some(config) = themes.get(index) {
            println!("{}", config.to_json_pretty()?);
        }
        return Ok(());
    }

    let mut manager = RoomManager::new(ScriptedHost::default(), themes).with_authored_floor(hr_data::sanctum());
    let seed = manager.build_floor(args.floor, args.seed)?;
    let layout = manager.layout();
    let config = manager.config();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&layout.cells())?);
        return Ok(());
    }

    println!(
        "floor {} '{}', seed {}: {} rooms, boss at {}",
        args.floor,
        config.name,
        seed,
        layout.room_count(),
        layout.boss
    );
    println!();
    print!("{}", render_map(layout, config));
    println!();
    println!("{}", LEGEND);
    for warning in &layout.warnings {
        println!("warning: {}", warning);
    }
    let report = manager.wiring_report();
    println!(
        "{} door pairs linked, {} doors sealed",
        report.linked_pairs,
        report.orphan_doors.len()
    );

    if args.walk {
        manager.take_events();
        println!();
        println!("walk:");
        let summary = walk_floor(&mut manager);
        println!(
            "visited {} rooms, cleared {}, killed {} enemies, used {} doors",
            summary.rooms_visited, summary.rooms_cleared, summary.enemies_killed, summary.doors_used
        );
    }
    Ok(())
}
