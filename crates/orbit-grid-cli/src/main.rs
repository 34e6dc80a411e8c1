//! Orbit Grid CLI
//!
//! Samples an orbit, lays it out over a grid of rotated viewports and
//! exports the vertex batches for an external renderer.
//!
//! Usage:
//!   erdorbit still   --config orbit.json --output output
//!   erdorbit animate --config orbit.json --frames 90
//!   erdorbit info    --config orbit.json

mod output;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use orbit_grid::config::load_config;
use orbit_grid::export::{reference_square, AnimationExport, GridExport, RunSummary};
use orbit_grid::rescale::max_abs_coordinate;
use orbit_grid::{RunConfig, Vec3};
use output::OutputSet;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "erdorbit",
    about = "Orbit trajectories rendered across a grid of rotated viewports"
)]
struct Args {
    /// JSON run configuration (built-in defaults when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, global = true, default_value = "output")]
    output: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export one grid for a still image
    Still {
        /// Draw the reference square instead of the orbit
        #[arg(long)]
        reference_square: bool,
    },
    /// Export one grid per animation frame
    Animate {
        /// Override the configured frame count
        #[arg(long)]
        frames: Option<usize>,

        /// Draw the reference square instead of the orbit
        #[arg(long)]
        reference_square: bool,
    },
    /// Print the trajectory summary without exporting
    Info,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "orbit_grid=debug,erdorbit=debug,info"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => {
            let config = RunConfig::default();
            config.validate_trajectory()?;
            config
        }
    };
    let output = OutputSet::new(&args.output, Utc::now());

    match args.command {
        Command::Still { reference_square } => still(&config, &output, reference_square),
        Command::Animate {
            frames,
            reference_square,
        } => animate(&config, &output, frames, reference_square),
        Command::Info => summary(&config),
    }
}

/// Reference square or the rescaled orbit, with the sample count to report
fn display_points(config: &RunConfig, square: bool) -> Result<(Vec<Vec3>, usize)> {
    if square {
        let points = reference_square(0.75);
        let n = points.len();
        return Ok((points, n));
    }
    let trajectory = config.display_trajectory()?;
    Ok((trajectory.positions(), trajectory.len()))
}

fn still(config: &RunConfig, output: &OutputSet, square: bool) -> Result<()> {
    config.validate_still()?;
    let (points, samples) = display_points(config, square)?;
    let grid = config.still_grid_from(&points)?;

    info!(
        "Grid {}x{}, {} vertices per viewport",
        grid.rows(),
        grid.cols(),
        points.len()
    );

    output.write("grid", &GridExport::from(&grid))?;
    output.write(
        "info",
        &RunSummary::new(config, samples, grid.rows(), grid.cols(), config.grid.pattern),
    )?;
    Ok(())
}

fn animate(config: &RunConfig, output: &OutputSet, frames: Option<usize>, square: bool) -> Result<()> {
    let mut config = *config;
    if let Some(frames) = frames {
        config.animation.frames = frames;
    }
    config.validate_animation()?;

    let (points, samples) = display_points(&config, square)?;
    let grids = config.animation_frames_from(&points)?;
    let animation = &config.animation;

    output.write("frames", &AnimationExport::from_grids(&grids))?;
    output.write(
        "info",
        &RunSummary::new(&config, samples, animation.rows, animation.cols, animation.pattern),
    )?;
    Ok(())
}

fn summary(config: &RunConfig) -> Result<()> {
    let elements = config.elements()?;
    let trajectory = config.trajectory()?;
    let extent = max_abs_coordinate(&trajectory.positions());

    info!("{}", "=".repeat(60));
    info!("Orbit");
    info!("{}", "=".repeat(60));
    info!("a    (km)  {}", elements.semi_major_axis());
    info!("e    (-)   {}", elements.eccentricity());
    info!("i    (deg) {}", elements.inclination());
    info!("raan (deg) {}", elements.raan());
    info!("om   (deg) {}", elements.arg_of_periapsis());
    info!("period (s) {:.1}", elements.period(config.mu_planet)?);
    info!("samples    {} (step {} s)", trajectory.len(), config.step_s);
    info!("max |coordinate| (km) {:.1}", extent);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_still_runs_with_unusable_animation_section() {
        let tmp = tempfile::tempdir().unwrap();
        let output = OutputSet::new(tmp.path(), Utc::now());
        let mut config = RunConfig::default();
        config.grid.rows = 2;
        config.grid.cols = 2;
        config.animation.frames = 0;

        still(&config, &output, true).unwrap();
        let text = std::fs::read_to_string(output.path("grid")).unwrap();
        let export: GridExport = serde_json::from_str(&text).unwrap();
        assert_eq!(export.viewports.len(), 4);
        assert_eq!(export.viewports[0].vertices.len(), 5);
    }

    #[test]
    fn test_frames_flag_overrides_config() {
        let tmp = tempfile::tempdir().unwrap();
        let output = OutputSet::new(tmp.path(), Utc::now());
        let mut config = RunConfig::default();
        config.animation.frames = 0;
        config.animation.rows = 2;
        config.animation.cols = 2;

        assert!(animate(&config, &output, None, true).is_err());
        animate(&config, &output, Some(3), true).unwrap();
        let text = std::fs::read_to_string(output.path("frames")).unwrap();
        let export: AnimationExport = serde_json::from_str(&text).unwrap();
        assert_eq!(export.frames.len(), 3);
    }
}
