//! Trajectory sampling
//!
//! Fixed-step sampling of a Keplerian orbit, corrected for the rotation of the
//! orbited body so the curve is drawn in its body-fixed frame.

use crate::kepler::{validate_mu, OrbitalElements};
use crate::rotation::Axis;
use crate::{GridError, Result, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    /// Seconds since periapsis
    pub time: f64,
    /// Body-fixed position (km), or display units after rescaling
    pub position: Vec3,
}

/// Time-ordered samples at a uniform step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.time).collect()
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.samples.iter().map(|s| s.position).collect()
    }

    /// Same times, new positions. Used after rescaling.
    pub fn with_positions(&self, positions: &[Vec3]) -> Result<Trajectory> {
        if positions.len() != self.samples.len() {
            return Err(GridError::Configuration(format!(
                "expected {} positions, got {}",
                self.samples.len(),
                positions.len()
            )));
        }
        let samples = self
            .samples
            .iter()
            .zip(positions)
            .map(|(s, p)| TrajectorySample {
                time: s.time,
                position: *p,
            })
            .collect();
        Ok(Trajectory { samples })
    }
}

/// Sampling parameters for [`TrajectorySampler`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySampler {
    /// Gravitational parameter of the orbited body (km³/s²)
    pub mu: f64,
    /// Rotation rate of the orbited body (deg/s)
    pub planet_rotation_rate: f64,
    /// Axis of the body's own rotation
    pub rotation_axis: Axis,
    pub step_seconds: f64,
    pub duration_seconds: f64,
}

impl TrajectorySampler {
    pub fn new(mu: f64, planet_rotation_rate: f64, step_seconds: f64, duration_seconds: f64) -> Self {
        Self {
            mu,
            planet_rotation_rate,
            rotation_axis: Axis::Z,
            step_seconds,
            duration_seconds,
        }
    }

    pub fn with_rotation_axis(mut self, axis: Axis) -> Self {
        self.rotation_axis = axis;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_mu(self.mu)?;
        if !(self.step_seconds.is_finite() && self.step_seconds > 0.0) {
            return Err(GridError::Configuration(format!(
                "step must be positive, got {} s",
                self.step_seconds
            )));
        }
        if !(self.duration_seconds.is_finite() && self.duration_seconds > 0.0) {
            return Err(GridError::Configuration(format!(
                "duration must be positive, got {} s",
                self.duration_seconds
            )));
        }
        if !self.planet_rotation_rate.is_finite() {
            return Err(GridError::Configuration(format!(
                "planet rotation rate must be finite, got {} deg/s",
                self.planet_rotation_rate
            )));
        }
        Ok(())
    }

    /// Sample times `i * step` strictly below the duration.
    pub fn times(&self) -> Result<Vec<f64>> {
        self.validate()?;
        let times: Vec<f64> = (0u64..)
            .map(|i| i as f64 * self.step_seconds)
            .take_while(|t| *t < self.duration_seconds)
            .collect();
        Ok(times)
    }

    pub fn sample(&self, elements: &OrbitalElements) -> Result<Trajectory> {
        elements.validate()?;
        let times = self.times()?;

        let mut samples = Vec::with_capacity(times.len());
        for time in times {
            let inertial = elements.position_at(time, self.mu)?;
            let position = self.body_fixed(&inertial, time);
            samples.push(TrajectorySample { time, position });
        }

        debug!(
            "Sampled {} positions (step {} s, duration {} s)",
            samples.len(),
            self.step_seconds,
            self.duration_seconds
        );

        Ok(Trajectory { samples })
    }

    /// Planetary rotation correction: the body has turned by `rate * t` degrees,
    /// so the body-fixed frame sees the position turned back by the same angle.
    fn body_fixed(&self, inertial: &Vec3, time: f64) -> Vec3 {
        self.rotation_axis
            .rotate(inertial, -self.planet_rotation_rate * time)
    }
}

/// Sample `elements` every `step_seconds` over `[0, duration_seconds)`.
pub fn sample(
    elements: &OrbitalElements,
    mu: f64,
    planet_rotation_rate: f64,
    step_seconds: f64,
    duration_seconds: f64,
) -> Result<Trajectory> {
    TrajectorySampler::new(mu, planet_rotation_rate, step_seconds, duration_seconds).sample(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EARTH_ROTATION_DEG_S, MU_EARTH};

    #[test]
    fn test_sample_count_and_uniform_step() {
        let elements = OrbitalElements::circular(7000.0).unwrap();
        let trajectory = sample(&elements, MU_EARTH, 0.0, 60.0, 6000.0).unwrap();

        assert_eq!(trajectory.len(), 100);
        for (i, s) in trajectory.samples().iter().enumerate() {
            assert_eq!(s.time, i as f64 * 60.0);
        }
    }

    #[test]
    fn test_partial_last_step_is_sampled() {
        let elements = OrbitalElements::circular(7000.0).unwrap();
        let trajectory = sample(&elements, MU_EARTH, 0.0, 30.0, 100.0).unwrap();

        assert_eq!(trajectory.times(), vec![0.0, 30.0, 60.0, 90.0]);
    }

    #[test]
    fn test_rejects_non_positive_step_or_duration() {
        let elements = OrbitalElements::circular(7000.0).unwrap();

        for (step, duration) in [(0.0, 100.0), (-1.0, 100.0), (10.0, 0.0), (10.0, -5.0)] {
            assert!(matches!(
                sample(&elements, MU_EARTH, 0.0, step, duration),
                Err(GridError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_rotation_correction_preserves_radius() {
        let elements = OrbitalElements::new(8000.0, 0.0, 51.6, 30.0, 0.0).unwrap();
        let trajectory = sample(&elements, MU_EARTH, 0.25, 120.0, 3600.0).unwrap();

        for s in trajectory.samples() {
            assert!((s.position.norm() - 8000.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_rotation_correction_angle() {
        // A body turning 1 deg/s about Z sees the sample at t = 90 s turned back by 90 degrees
        let elements = OrbitalElements::circular(7000.0).unwrap();
        let fixed = sample(&elements, MU_EARTH, 0.0, 90.0, 100.0).unwrap();
        let rotating = sample(&elements, MU_EARTH, 1.0, 90.0, 100.0).unwrap();

        let inertial = fixed.samples()[1].position;
        let corrected = rotating.samples()[1].position;
        let expected = Axis::Z.rotate(&inertial, -90.0);
        assert!((corrected - expected).norm() < 1e-9);
    }

    #[test]
    fn test_geostationary_orbit_stays_fixed() {
        // Radius whose mean motion matches the body's spin
        let spin = EARTH_ROTATION_DEG_S.to_radians();
        let radius = (MU_EARTH / (spin * spin)).cbrt();
        let elements = OrbitalElements::circular(radius).unwrap();
        let trajectory =
            sample(&elements, MU_EARTH, EARTH_ROTATION_DEG_S, 3600.0, 6.0 * 3600.0).unwrap();

        assert_eq!(trajectory.len(), 6);
        for s in trajectory.samples() {
            let drift = s.position.y.atan2(s.position.x).to_degrees();
            assert!(drift.abs() < 1e-6, "t={} drift {} deg", s.time, drift);
            assert!((s.position.norm() - radius).abs() < 1e-6);
        }
    }

    #[test]
    fn test_prograde_orbit_drifts_at_relative_rate() {
        let elements = OrbitalElements::circular(7000.0).unwrap();
        let orbit_rate = 360.0 / elements.period(MU_EARTH).unwrap();
        let trajectory = sample(&elements, MU_EARTH, EARTH_ROTATION_DEG_S, 60.0, 120.0).unwrap();

        let p = trajectory.samples()[1].position;
        let swept = p.y.atan2(p.x).to_degrees();
        let expected = (orbit_rate - EARTH_ROTATION_DEG_S) * 60.0;
        assert!((swept - expected).abs() < 1e-9, "swept {} expected {}", swept, expected);
    }

    #[test]
    fn test_with_positions_keeps_times() {
        let elements = OrbitalElements::circular(7000.0).unwrap();
        let trajectory = sample(&elements, MU_EARTH, 0.0, 60.0, 180.0).unwrap();
        let moved = trajectory
            .with_positions(&[Vec3::zeros(), Vec3::x(), Vec3::y()])
            .unwrap();

        assert_eq!(moved.times(), trajectory.times());
        assert_eq!(moved.positions()[1], Vec3::x());
        assert!(trajectory.with_positions(&[Vec3::x()]).is_err());
    }
}
