//! dropgrade CLI — validate and grade drag-and-drop tasks from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use dropgrade_core::model::{ElementId, ZoneId};

mod commands;

#[derive(Parser)]
#[command(name = "dropgrade", version, about = "Drag-and-drop question grader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate task files
    Validate {
        /// Path to a .toml/.json task file or directory
        #[arg(long)]
        task: PathBuf,

        /// Content folder used to resolve background paths
        #[arg(long)]
        content_base: Option<String>,
    },

    /// Place elements and grade the result
    Grade {
        /// Path to a .toml/.json task file
        #[arg(long)]
        task: PathBuf,

        /// Placement as ELEMENT:ZONE (repeatable)
        #[arg(long = "place", value_parser = parse_placement)]
        places: Vec<(ElementId, ZoneId)>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Also write the JSON report to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Create an example task file
    Init,
}

fn parse_placement(s: &str) -> Result<(ElementId, ZoneId), String> {
    let (element, zone) = s
        .split_once(':')
        .ok_or_else(|| format!("expected ELEMENT:ZONE, got {s:?}"))?;
    let element = element
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid element index {element:?}: {e}"))?;
    let zone = zone
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid zone index {zone:?}: {e}"))?;
    Ok((ElementId(element), ZoneId(zone)))
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dropgrade=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { task, content_base } => {
            commands::validate::execute(task, content_base)
        }
        Commands::Grade {
            task,
            places,
            format,
            output,
        } => commands::grade::execute(task, places, format, output),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
