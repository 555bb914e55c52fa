//! Kinetic CLI
//!
//! Runs motion scenes without a browser:
//! - `kinetic simulate` loads a `kinetic.toml` scene, ticks the engine with a
//!   fixed timestep and prints every applied transform as JSON lines
//! - `kinetic init` writes a starter scene

mod config;
mod host;
mod project;
mod simulate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::SceneConfig;
use crate::simulate::RunOptions;

/// Headless runner for kinetic motion scenes
#[derive(Parser, Debug)]
#[command(name = "kinetic")]
#[command(about = "Run kinetic motion scenes headlessly")]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a scene and print transforms as JSON lines
    Simulate {
        /// Scene file or directory containing kinetic.toml
        #[arg(default_value = ".")]
        scene: PathBuf,

        /// Number of frames to tick
        #[arg(short, long, default_value_t = 120)]
        frames: u32,

        /// Seconds per frame
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,

        /// RNG seed (defaults to the scene seed)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Create a starter kinetic.toml
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Overwrite an existing scene
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Simulate {
            scene,
            frames,
            dt,
            seed,
        } => {
            let config = SceneConfig::load(&scene)?;
            let options = RunOptions { frames, dt, seed };
            let summary = simulate::run(&config, options, io::stdout().lock())?;
            info!(
                objects = summary.objects,
                frames = summary.frames,
                lines = summary.lines,
                messages = summary.messages_accepted,
                "simulation complete"
            );
        }
        Commands::Init { dir, force } => {
            let path = project::init_scene(&dir, force)?;
            info!("Created {}", path.display());
        }
    }

    Ok(())
}
