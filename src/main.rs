mod animation;
mod app;
mod config;
mod controller;
mod error;
mod graphics;
mod input;
mod math;
mod report;
mod scene;
mod state;
mod surface;
mod transform;

use crate::config::SceneConfig;
use crate::error::AppError;
use crate::input::Form;
use anyhow::Context;
use clap::Parser;
use env_logger::{Env, Target};
use log::info;
use std::fs::File;
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(version, about = "A console-based 2D affine transform visualizer")]
struct Args {
    /// Initial horizontal translation
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    translate_x: String,

    /// Initial vertical translation (upward positive)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    translate_y: String,

    /// Initial rotation in degrees
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    rotate: String,

    /// Initial pivot x coordinate
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pivot_x: String,

    /// Initial pivot y coordinate (upward positive)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pivot_y: String,

    /// Logical width of the drawing surface
    #[arg(long, default_value_t = 400.0)]
    width: f64,

    /// Logical height of the drawing surface
    #[arg(long, default_value_t = 400.0)]
    height: f64,

    /// Surface units per unit of the rectangle
    #[arg(long, default_value_t = config::DISPLAY_SCALE)]
    scale: f64,

    /// Duration of the rotation animation in milliseconds
    #[arg(long, default_value_t = config::ANIMATION_MS)]
    duration: f64,

    /// Spacing between axis tick labels
    #[arg(long, default_value_t = config::TICK_SPACING)]
    tick_spacing: usize,

    /// Write log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Logs go to `--log-file`; the terminal itself is busy with the canvas
fn init_logging(args: &Args) -> error::Result<()> {
    let mut builder = match &args.log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| AppError::LogFile {
                path: path.clone(),
                source,
            })?;
            let level = if args.verbose { "debug" } else { "info" };
            let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(level));
            builder.target(Target::Pipe(Box::new(file)));
            builder
        }
        None => env_logger::Builder::from_env(Env::default().default_filter_or("off")),
    };
    builder.init();
    Ok(())
}

/// Main function
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    info!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = SceneConfig {
        scale: args.scale,
        animation_ms: args.duration,
        tick_spacing: args.tick_spacing,
        ..SceneConfig::default()
    };
    let form = Form::with_values([
        args.translate_x,
        args.translate_y,
        args.rotate,
        args.pivot_x,
        args.pivot_y,
    ]);

    app::run(config, (args.width, args.height), form).context("visualizer stopped with an error")
}
