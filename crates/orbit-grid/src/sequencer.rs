//! Frame Sequencer
//!
//! One fresh [`Grid`] per animation frame, angles taken from a
//! [`RotationPattern`], all filled from the same shared point batch.

use crate::grid::Grid;
use crate::pattern::RotationPattern;
use crate::{GridError, Result, Vec3};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSequencer {
    pub rows: usize,
    pub cols: usize,
    pub spacing_factor: f64,
    pub frames: usize,
}

impl FrameSequencer {
    pub fn new(rows: usize, cols: usize, spacing_factor: f64, frames: usize) -> Result<Self> {
        if frames == 0 {
            return Err(GridError::Configuration(
                "animation needs at least one frame".to_string(),
            ));
        }
        // Surface topology errors before any frame is built
        Grid::new(rows, cols, spacing_factor)?;
        Ok(Self {
            rows,
            cols,
            spacing_factor,
            frames,
        })
    }

    pub fn frame(&self, pattern: &dyn RotationPattern, points: &[Vec3], frame: usize) -> Result<Grid> {
        let mut grid = Grid::new(self.rows, self.cols, self.spacing_factor)?;
        grid.apply_pattern(pattern, frame);
        grid.set_vertices(points);
        Ok(grid)
    }

    pub fn build(&self, pattern: &dyn RotationPattern, points: &[Vec3]) -> Result<Vec<Grid>> {
        let grids = (0..self.frames)
            .map(|frame| self.frame(pattern, points, frame))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Built {} frames of {}x{} viewports ({} vertices each)",
            grids.len(),
            self.rows,
            self.cols,
            points.len()
        );

        Ok(grids)
    }
}
