//! Run configuration
//!
//! Typed parameters for one run, loaded from JSON. Every field has an
//! explicit default, so a partial file only overrides what it names.

use crate::grid::Grid;
use crate::kepler::OrbitalElements;
use crate::pattern::{ParallaxSweep, PatternSpec};
use crate::rescale::{rescale, rescale_centered};
use crate::rotation::Axis;
use crate::sequencer::FrameSequencer;
use crate::trajectory::{Trajectory, TrajectorySampler};
use crate::{GridError, Result, Vec3, EARTH_ROTATION_DEG_S, MU_EARTH};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// Classical elements as written in the config file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub raan_deg: f64,
    pub arg_of_periapsis_deg: f64,
}

impl Default for OrbitConfig {
    /// Molniya-type orbit
    fn default() -> Self {
        Self {
            semi_major_axis_km: 26_600.0,
            eccentricity: 0.74,
            inclination_deg: 63.4,
            raan_deg: 0.0,
            arg_of_periapsis_deg: 270.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub spacing_factor: f64,
    /// Half-extent of the display cube the trajectory is rescaled into
    pub half_extent: f64,
    /// Centre the trajectory bounding box before rescaling
    pub center_trajectory: bool,
    pub pattern: PatternSpec,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 9,
            cols: 9,
            spacing_factor: 0.8,
            half_extent: 0.9,
            center_trajectory: false,
            pattern: PatternSpec::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub frames: usize,
    pub rows: usize,
    pub cols: usize,
    pub pattern: PatternSpec,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames: 90,
            rows: 10,
            cols: 10,
            pattern: PatternSpec::ParallaxSweep(ParallaxSweep::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub orbit: OrbitConfig,
    /// Gravitational parameter of the orbited body (km³/s²)
    pub mu_planet: f64,
    /// Rotation rate of the orbited body (deg/s)
    pub planet_rotation_deg_s: f64,
    pub planet_rotation_axis: Axis,
    pub step_s: f64,
    pub duration_s: f64,
    pub grid: GridConfig,
    pub animation: AnimationConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            orbit: OrbitConfig::default(),
            mu_planet: MU_EARTH,
            planet_rotation_deg_s: EARTH_ROTATION_DEG_S,
            planet_rotation_axis: Axis::Z,
            step_s: 60.0,
            // One sidereal day
            duration_s: 86_164.0,
            grid: GridConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn elements(&self) -> Result<OrbitalElements> {
        OrbitalElements::new(
            self.orbit.semi_major_axis_km,
            self.orbit.eccentricity,
            self.orbit.inclination_deg,
            self.orbit.raan_deg,
            self.orbit.arg_of_periapsis_deg,
        )
    }

    pub fn sampler(&self) -> TrajectorySampler {
        TrajectorySampler::new(
            self.mu_planet,
            self.planet_rotation_deg_s,
            self.step_s,
            self.duration_s,
        )
        .with_rotation_axis(self.planet_rotation_axis)
    }

    /// Orbit, sampling and display cube: what every run needs.
    pub fn validate_trajectory(&self) -> Result<()> {
        self.elements()?;
        self.sampler().validate()?;
        if !(self.grid.half_extent.is_finite() && self.grid.half_extent > 0.0) {
            return Err(GridError::Configuration(format!(
                "grid half-extent must be positive, got {}",
                self.grid.half_extent
            )));
        }
        Ok(())
    }

    /// Trajectory plus the still-image grid section
    pub fn validate_still(&self) -> Result<()> {
        self.validate_trajectory()?;
        Grid::new(self.grid.rows, self.grid.cols, self.grid.spacing_factor)?;
        Ok(())
    }

    /// Trajectory plus the animation section
    pub fn validate_animation(&self) -> Result<()> {
        self.validate_trajectory()?;
        self.sequencer()?;
        Ok(())
    }

    /// Every section, whichever output is produced later
    pub fn validate(&self) -> Result<()> {
        self.validate_still()?;
        self.validate_animation()
    }

    fn sequencer(&self) -> Result<FrameSequencer> {
        FrameSequencer::new(
            self.animation.rows,
            self.animation.cols,
            self.grid.spacing_factor,
            self.animation.frames,
        )
    }

    /// Body-fixed trajectory (km)
    pub fn trajectory(&self) -> Result<Trajectory> {
        self.sampler().sample(&self.elements()?)
    }

    /// Trajectory rescaled into the display cube
    pub fn display_trajectory(&self) -> Result<Trajectory> {
        let raw = self.trajectory()?;
        let positions = raw.positions();
        let rescaled = if self.grid.center_trajectory {
            rescale_centered(&positions, self.grid.half_extent)?
        } else {
            rescale(&positions, self.grid.half_extent)?
        };
        debug!("Rescaled trajectory by {:e}", rescaled.scale);
        raw.with_positions(&rescaled.points)
    }

    /// Single grid for a still image, filled with the display trajectory
    pub fn still_grid(&self) -> Result<Grid> {
        self.validate_still()?;
        let points = self.display_trajectory()?.positions();
        self.still_grid_from(&points)
    }

    /// Single grid for a still image, filled with `points` (display units)
    pub fn still_grid_from(&self, points: &[Vec3]) -> Result<Grid> {
        let mut grid = Grid::new(self.grid.rows, self.grid.cols, self.grid.spacing_factor)?;
        grid.apply_pattern(&self.grid.pattern, 0);
        grid.set_vertices(points);
        Ok(grid)
    }

    /// One grid per animation frame, filled with the display trajectory
    pub fn animation_frames(&self) -> Result<Vec<Grid>> {
        self.validate_animation()?;
        let points = self.display_trajectory()?.positions();
        self.animation_frames_from(&points)
    }

    /// One grid per animation frame, filled with `points` (display units)
    pub fn animation_frames_from(&self, points: &[Vec3]) -> Result<Vec<Grid>> {
        self.sequencer()?.build(&self.animation.pattern, points)
    }
}

/// Load a JSON run configuration and validate its trajectory section.
///
/// Grid and animation sections are checked by the output that uses them.
pub fn load_config(path: impl AsRef<Path>) -> Result<RunConfig> {
    let path = path.as_ref();
    info!("Loading configuration from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config: RunConfig = serde_json::from_reader(reader)?;
    config.validate_trajectory()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        RunConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let json = r#"{
            "orbit": {"semi_major_axis_km": 7000.0, "eccentricity": 0.0},
            "step_s": 30.0,
            "grid": {"rows": 3, "cols": 4, "pattern": {"kind": "centered_fan", "step_deg": 10.0}}
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.orbit.semi_major_axis_km, 7000.0);
        assert_eq!(config.orbit.inclination_deg, 63.4);
        assert_eq!(config.step_s, 30.0);
        assert_eq!(config.mu_planet, MU_EARTH);
        assert_eq!(config.grid.cols, 4);
        assert_eq!(config.grid.spacing_factor, 0.8);
        assert_eq!(config.animation, AnimationConfig::default());
    }

    #[test]
    fn test_invalid_file_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"orbit": {"eccentricity": 1.2}}"#).unwrap();
        assert!(matches!(
            load_config(file.path()),
            Err(GridError::Configuration(_))
        ));

        let mut garbage = NamedTempFile::new().unwrap();
        garbage.write_all(b"a = 7000").unwrap();
        assert!(matches!(load_config(garbage.path()), Err(GridError::Json(_))));
    }

    #[test]
    fn test_still_ignores_animation_section() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"step_s": 600.0, "grid": {"rows": 2, "cols": 2}, "animation": {"frames": 0}}"#)
            .unwrap();

        let config = load_config(file.path()).unwrap();
        let grid = config.still_grid().unwrap();
        assert_eq!(grid.rows(), 2);
        assert!(matches!(
            config.animation_frames(),
            Err(GridError::Configuration(_))
        ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_animation_ignores_still_grid_section() {
        let mut config = RunConfig::default();
        config.step_s = 600.0;
        config.grid.rows = 0;
        config.animation.frames = 3;
        config.animation.rows = 2;
        config.animation.cols = 2;

        assert!(config.still_grid().is_err());
        assert_eq!(config.animation_frames().unwrap().len(), 3);
    }

    #[test]
    fn test_grids_from_explicit_points() {
        let mut config = RunConfig::default();
        config.grid.rows = 2;
        config.grid.cols = 3;
        config.animation.frames = 4;

        let points = [Vec3::x(), Vec3::y()];
        let grid = config.still_grid_from(&points).unwrap();
        assert!(grid.batches().all(|(_, _, v)| v.len() == 2));

        let frames = config.animation_frames_from(&points).unwrap();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0].rows(), config.animation.rows);
    }

    #[test]
    fn test_still_grid_fits_envelope() {
        let mut config = RunConfig::default();
        config.duration_s = 43_082.0;
        config.step_s = 300.0;
        config.grid.rows = 3;
        config.grid.cols = 3;

        let grid = config.still_grid().unwrap();
        // Rotation can turn a cube corner onto an axis
        let radius = 3f64.sqrt() * config.grid.half_extent / 3.0 + 1e-9;
        for (_, _, viewport) in grid.viewports() {
            assert!(!viewport.vertices().is_empty());
            for v in viewport.vertices() {
                assert!((v - viewport.center()).norm() <= radius);
            }
        }
    }
}
