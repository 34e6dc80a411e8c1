//! Renderer hand-off
//!
//! Serializable snapshots of finished grids, plus the run summary written
//! next to them.

use crate::config::{OrbitConfig, RunConfig};
use crate::grid::Grid;
use crate::pattern::PatternSpec;
use crate::rotation::EulerAngles;
use crate::Vec3;
use serde::{Deserialize, Serialize};

fn to_array(v: &Vec3) -> [f64; 3] {
    [v.x, v.y, v.z]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportExport {
    pub row: usize,
    pub col: usize,
    pub center: [f64; 3],
    pub angles: EulerAngles,
    /// Line strip, in draw order
    pub vertices: Vec<[f64; 3]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridExport {
    pub rows: usize,
    pub cols: usize,
    pub spacing_factor: f64,
    pub scale_factor: f64,
    pub viewports: Vec<ViewportExport>,
}

impl From<&Grid> for GridExport {
    fn from(grid: &Grid) -> Self {
        let viewports = grid
            .viewports()
            .map(|(row, col, viewport)| ViewportExport {
                row,
                col,
                center: to_array(&viewport.center()),
                angles: viewport.angles(),
                vertices: viewport.vertices().iter().map(to_array).collect(),
            })
            .collect();

        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            spacing_factor: grid.spacing_factor(),
            scale_factor: grid.scale_factor(),
            viewports,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationExport {
    pub frames: Vec<GridExport>,
}

impl AnimationExport {
    pub fn from_grids(grids: &[Grid]) -> Self {
        Self {
            frames: grids.iter().map(GridExport::from).collect(),
        }
    }
}

/// Parameters a run was produced with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub version: String,
    pub step_s: f64,
    pub duration_s: f64,
    pub samples: usize,
    pub orbit: OrbitConfig,
    pub mu_planet: f64,
    pub planet_rotation_deg_s: f64,
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub pattern: PatternSpec,
}

impl RunSummary {
    pub fn new(config: &RunConfig, samples: usize, rows: usize, cols: usize, pattern: PatternSpec) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            step_s: config.step_s,
            duration_s: config.duration_s,
            samples,
            orbit: config.orbit,
            mu_planet: config.mu_planet,
            planet_rotation_deg_s: config.planet_rotation_deg_s,
            grid_rows: rows,
            grid_cols: cols,
            pattern,
        }
    }
}

/// Closed square in the XY plane, for checking a renderer without an orbit.
pub fn reference_square(half: f64) -> Vec<Vec3> {
    vec![
        Vec3::new(half, half, 0.0),
        Vec3::new(-half, half, 0.0),
        Vec3::new(-half, -half, 0.0),
        Vec3::new(half, -half, 0.0),
        Vec3::new(half, half, 0.0),
    ]
}
