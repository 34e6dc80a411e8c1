//! Rotation patterns
//!
//! Per-viewport display angles as a function of (row, col, frame).

use crate::rotation::EulerAngles;
use serde::{Deserialize, Serialize};

pub trait RotationPattern {
    fn angles(&self, row: usize, col: usize, rows: usize, cols: usize, frame: usize) -> EulerAngles;
}

/// Still-image fan: tilt about X grows with distance from the middle row,
/// turn about Y with distance from the middle column, plus a fixed Y offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenteredFan {
    pub step_deg: f64,
    pub beta_offset_deg: f64,
}

impl Default for CenteredFan {
    fn default() -> Self {
        Self {
            step_deg: 15.0,
            beta_offset_deg: 25.0,
        }
    }
}

impl RotationPattern for CenteredFan {
    fn angles(&self, row: usize, col: usize, rows: usize, cols: usize, _frame: usize) -> EulerAngles {
        let dr = row as f64 - (rows / 2) as f64;
        let dc = col as f64 - (cols / 2) as f64;
        EulerAngles::new(dr * self.step_deg, -dc * self.step_deg + self.beta_offset_deg, 0.0)
    }
}

/// Animation sweep: every frame advances both angles by `step_deg`, offset
/// by row (X) and column (Y) to give a parallax ripple across the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxSweep {
    pub step_deg: f64,
}

impl Default for ParallaxSweep {
    fn default() -> Self {
        Self { step_deg: 2.0 }
    }
}

impl RotationPattern for ParallaxSweep {
    fn angles(&self, row: usize, col: usize, _rows: usize, _cols: usize, frame: usize) -> EulerAngles {
        let f = frame as f64;
        EulerAngles::new(
            (row as f64 + f) * self.step_deg,
            (-(col as f64) + f) * self.step_deg,
            0.0,
        )
    }
}

/// Serializable pattern choice for configuration files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternSpec {
    CenteredFan(CenteredFan),
    ParallaxSweep(ParallaxSweep),
}

impl Default for PatternSpec {
    fn default() -> Self {
        PatternSpec::CenteredFan(CenteredFan::default())
    }
}

impl RotationPattern for PatternSpec {
    fn angles(&self, row: usize, col: usize, rows: usize, cols: usize, frame: usize) -> EulerAngles {
        match self {
            PatternSpec::CenteredFan(p) => p.angles(row, col, rows, cols, frame),
            PatternSpec::ParallaxSweep(p) => p.angles(row, col, rows, cols, frame),
        }
    }
}
