//! Orbit Grid Library
//!
//! Two-body Keplerian trajectory sampling, planetary rotation correction,
//! display-cube rescaling and rotated viewport grids for orbit mosaics.
//!
//! # Pipeline
//!
//! ```text
//! OrbitalElements ─▶ trajectory::sample ─▶ rescale::rescale ─▶ Grid::set_vertices ─▶ renderer
//!                      (kepler + rotation)                      (rotation per viewport)
//! ```
//!
//! The library never draws anything. A finished [`Grid`] exposes its vertex
//! batches through [`Grid::batches`] or the serializable [`export::GridExport`].

use thiserror::Error;

pub mod config;
pub mod export;
pub mod grid;
pub mod kepler;
pub mod pattern;
pub mod rescale;
pub mod rotation;
pub mod sequencer;
pub mod trajectory;

pub use config::RunConfig;
pub use grid::{Grid, Viewport};
pub use kepler::OrbitalElements;
pub use pattern::{CenteredFan, ParallaxSweep, RotationPattern};
pub use rotation::{Axis, EulerAngles};
pub use sequencer::FrameSequencer;
pub use trajectory::{Trajectory, TrajectorySample};

/// 3-vector used throughout the pipeline (km before rescaling, display units after).
pub type Vec3 = nalgebra::Vector3<f64>;

/// Earth gravitational parameter (km³/s²)
pub const MU_EARTH: f64 = 398_600.4418;

/// Earth sidereal rotation rate (deg/s)
pub const EARTH_ROTATION_DEG_S: f64 = 360.0 / 86_164.0905;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("Viewport ({row}, {col}) out of bounds for {rows}x{cols} grid")]
    Bounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error(
        "Kepler equation did not converge after {iterations} iterations (M = {mean_anomaly}, e = {eccentricity})"
    )]
    Numerical {
        mean_anomaly: f64,
        eccentricity: f64,
        iterations: usize,
    },
}

pub type Result<T> = std::result::Result<T, GridError>;
