use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use foundation::math::Vec2;
use navigation::ViewerConfig;
use serde::Serialize;
use tools::{AssetCheck, project, summarize, walk};
use tour::{TourPackage, TourPackageError, ViewpointGraph, ViewpointId, default_tour};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Dome explorer tour tooling")]
struct Cli {
    /// Viewer configuration (JSON); defaults apply to missing fields
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct TourSource {
    /// Tour directory containing tour.manifest.json
    dir: Option<PathBuf>,

    /// Use the bundled corridor / main hall / old room tour
    #[arg(long = "default", conflicts_with = "dir")]
    bundled: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a tour package and report every configuration issue
    Validate {
        dir: PathBuf,
    },

    /// Print the viewpoint graph as JSON
    Graph {
        #[command(flatten)]
        source: TourSource,
    },

    /// Project a panorama pixel onto the sphere
    Project {
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
        #[arg(long, default_value_t = 450.0)]
        radius: f64,
    },

    /// Drive a headless session through a list of viewpoints
    Walk {
        #[command(flatten)]
        source: TourSource,

        /// Viewpoint ids to visit after the starting one
        #[arg(long = "to", num_args = 1..)]
        path: Vec<String>,

        /// Fail texture loads whose file is missing on disk
        #[arg(long)]
        check_assets: bool,
    },
}

fn main() {
    let filter = EnvFilter::try_from_env("DOME_LOG").unwrap_or_else(|_| EnvFilter::from_default_env());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main(Cli::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Validate { dir } => cmd_validate(dir),
        Command::Graph { source } => {
            let graph = load_graph(&source, &config)?;
            print_json(&summarize(&graph))
        }
        Command::Project {
            x,
            y,
            width,
            height,
            radius,
        } => print_json(&project(
            Vec2::new(x, y),
            Vec2::new(width, height),
            radius,
        )),
        Command::Walk {
            source,
            path,
            check_assets,
        } => {
            let graph = load_graph(&source, &config)?;
            let path: Vec<ViewpointId> = path.into_iter().map(ViewpointId::new).collect();
            let check = if check_assets {
                AssetCheck::Filesystem
            } else {
                AssetCheck::Assume
            };
            print_json(&walk(graph, config, &path, check)?)
        }
    }
}

fn cmd_validate(dir: PathBuf) -> Result<(), Box<dyn Error>> {
    let package = TourPackage::load(&dir)?;
    match package.graph() {
        Ok(graph) => {
            println!(
                "ok: {} viewpoints, starting at `{}`",
                graph.len(),
                graph.starting_id()
            );
            Ok(())
        }
        Err(TourPackageError::Configuration(err)) => {
            for issue in &err.issues {
                println!("issue: {issue}");
            }
            Err(format!("{} issue(s) in {}", err.issues.len(), dir.display()).into())
        }
        Err(other) => Err(other.into()),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ViewerConfig, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(ViewerConfig::default());
    };
    let payload = fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
    let config = ViewerConfig::from_json_str(&payload)?;
    tracing::debug!(path = %path.display(), "viewer config loaded");
    Ok(config)
}

fn load_graph(source: &TourSource, config: &ViewerConfig) -> Result<ViewpointGraph, Box<dyn Error>> {
    match (&source.dir, source.bundled) {
        (_, true) => Ok(default_tour(&config.asset_root)?),
        (Some(dir), false) => Ok(TourPackage::load(dir)?.graph()?),
        (None, false) => Err("give a tour directory or --default".into()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
