//! Viewport Grid
//!
//! A rows × cols mosaic of viewports, each showing its own rotated, shrunk
//! and offset copy of one shared point batch.
//!
//! Centers sit on an even lattice spanning `[-spacing, spacing]` on X (by
//! column) and Y (by row); a single row or column sits at 0. Every viewport
//! divides by `max(rows, cols)`, so a larger grid shrinks each cell and the
//! mosaic keeps a fixed envelope.
//!
//! Topology is fixed at construction. Vertices are append-only.

use crate::pattern::RotationPattern;
use crate::rotation::EulerAngles;
use crate::{GridError, Result, Vec3};
use tracing::debug;

/// Display transform of one viewport: rotate (X, Y, Z), divide by `scale`, add `center`.
///
/// Pure function of its inputs. `points` is never modified.
pub fn transform_batch(points: &[Vec3], angles: &EulerAngles, scale: f64, center: &Vec3) -> Vec<Vec3> {
    points
        .iter()
        .map(|p| angles.apply(p) / scale + center)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    center: Vec3,
    angles: EulerAngles,
    scale_factor: f64,
    vertices: Vec<Vec3>,
}

impl Viewport {
    fn new(center: Vec3, scale_factor: f64) -> Self {
        Self {
            center,
            angles: EulerAngles::default(),
            scale_factor,
            vertices: Vec::new(),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn angles(&self) -> EulerAngles {
        self.angles
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Consecutive vertex pairs, drawn as a line strip
    pub fn segments(&self) -> impl Iterator<Item = (&Vec3, &Vec3)> + '_ {
        self.vertices.windows(2).map(|w| (&w[0], &w[1]))
    }

    fn append(&mut self, points: &[Vec3]) {
        let transformed = transform_batch(points, &self.angles, self.scale_factor, &self.center);
        self.vertices.extend(transformed);
    }
}

/// Lattice coordinate of `index` among `n` evenly spaced positions in `[-spacing, spacing]`
fn lattice(index: usize, n: usize, spacing: f64) -> f64 {
    if n <= 1 {
        0.0
    } else {
        spacing * (-1.0 + 2.0 * index as f64 / (n - 1) as f64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    spacing_factor: f64,
    scale_factor: f64,
    viewports: Vec<Vec<Viewport>>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize, spacing_factor: f64) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Configuration(format!(
                "grid needs at least one row and column, got {}x{}",
                rows, cols
            )));
        }
        if !(spacing_factor.is_finite() && spacing_factor >= 0.0) {
            return Err(GridError::Configuration(format!(
                "spacing factor must be finite and non-negative, got {}",
                spacing_factor
            )));
        }

        let scale_factor = rows.max(cols) as f64;
        let viewports = (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| {
                        let center = Vec3::new(
                            lattice(col, cols, spacing_factor),
                            lattice(row, rows, spacing_factor),
                            0.0,
                        );
                        Viewport::new(center, scale_factor)
                    })
                    .collect()
            })
            .collect();

        debug!("Built {}x{} grid (spacing {})", rows, cols, spacing_factor);

        Ok(Self {
            rows,
            cols,
            spacing_factor,
            scale_factor,
            viewports,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn spacing_factor(&self) -> f64 {
        self.spacing_factor
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row < self.rows && col < self.cols {
            Ok(())
        } else {
            Err(GridError::Bounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn viewport(&self, row: usize, col: usize) -> Result<&Viewport> {
        self.check_bounds(row, col)?;
        Ok(&self.viewports[row][col])
    }

    pub fn set_rotation(&mut self, row: usize, col: usize, alpha: f64, beta: f64, gamma: f64) -> Result<()> {
        self.check_bounds(row, col)?;
        self.viewports[row][col].angles = EulerAngles::new(alpha, beta, gamma);
        Ok(())
    }

    /// Assign every viewport the angles `pattern` gives for `frame`.
    pub fn apply_pattern(&mut self, pattern: &dyn RotationPattern, frame: usize) {
        let (rows, cols) = (self.rows, self.cols);
        for (row, line) in self.viewports.iter_mut().enumerate() {
            for (col, viewport) in line.iter_mut().enumerate() {
                viewport.angles = pattern.angles(row, col, rows, cols, frame);
            }
        }
    }

    /// Append the transformed copy of `points` to every viewport.
    pub fn set_vertices(&mut self, points: &[Vec3]) {
        for viewport in self.viewports.iter_mut().flatten() {
            viewport.append(points);
        }
        debug!(
            "Appended {} vertices to each of {} viewports",
            points.len(),
            self.rows * self.cols
        );
    }

    /// Viewports in row-major order
    pub fn viewports(&self) -> impl Iterator<Item = (usize, usize, &Viewport)> + '_ {
        self.viewports.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(move |(col, viewport)| (row, col, viewport))
        })
    }

    /// Renderer contract: (row, col, vertices) in row-major order
    pub fn batches(&self) -> impl Iterator<Item = (usize, usize, &[Vec3])> + '_ {
        self.viewports()
            .map(|(row, col, viewport)| (row, col, viewport.vertices()))
    }
}
