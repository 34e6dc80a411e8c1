//! Frame Rotation
//!
//! Right-handed active rotations about the coordinate axes, angles in degrees.
//!
//! One primitive, two meanings: the trajectory sampler uses it to turn an
//! inertial position into the rotating body-fixed frame, while the viewport
//! grid uses it for cosmetic display orientation. Callers go through
//! [`Axis::rotate`] and [`EulerAngles::apply`] respectively.

use crate::Vec3;
use serde::{Deserialize, Serialize};

/// Rotate `v` about the X axis by `angle_deg`.
pub fn rotate_x(v: &Vec3, angle_deg: f64) -> Vec3 {
    let (s, c) = angle_deg.to_radians().sin_cos();
    Vec3::new(v.x, c * v.y - s * v.z, s * v.y + c * v.z)
}

/// Rotate `v` about the Y axis by `angle_deg`.
pub fn rotate_y(v: &Vec3, angle_deg: f64) -> Vec3 {
    let (s, c) = angle_deg.to_radians().sin_cos();
    Vec3::new(c * v.x + s * v.z, v.y, -s * v.x + c * v.z)
}

/// Rotate `v` about the Z axis by `angle_deg`.
pub fn rotate_z(v: &Vec3, angle_deg: f64) -> Vec3 {
    let (s, c) = angle_deg.to_radians().sin_cos();
    Vec3::new(c * v.x - s * v.y, s * v.x + c * v.y, v.z)
}

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn rotate(self, v: &Vec3, angle_deg: f64) -> Vec3 {
        match self {
            Axis::X => rotate_x(v, angle_deg),
            Axis::Y => rotate_y(v, angle_deg),
            Axis::Z => rotate_z(v, angle_deg),
        }
    }

    /// Rotate every vector of a batch independently. The input is left untouched.
    pub fn rotate_batch(self, points: &[Vec3], angle_deg: f64) -> Vec<Vec3> {
        points.iter().map(|p| self.rotate(p, angle_deg)).collect()
    }
}

/// Display orientation of a viewport: alpha about X, beta about Y, gamma about Z (degrees)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl EulerAngles {
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }

    /// Apply X, then Y, then Z.
    pub fn apply(&self, v: &Vec3) -> Vec3 {
        let v = rotate_x(v, self.alpha);
        let v = rotate_y(&v, self.beta);
        rotate_z(&v, self.gamma)
    }
}
