//! Keplerian state vector
//!
//! Classical elements to inertial position for a closed two-body orbit.

use crate::rotation::{rotate_x, rotate_z};
use crate::{GridError, Result, Vec3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Newton tolerance on |E - e sin E - M|
pub const KEPLER_TOLERANCE: f64 = 1e-12;

/// Newton iteration budget
pub const KEPLER_MAX_ITERATIONS: usize = 50;

/// Closed-orbit elements. Angles in degrees, semi-major axis in km.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    semi_major_axis: f64,
    eccentricity: f64,
    inclination: f64,
    raan: f64,
    arg_of_periapsis: f64,
}

impl OrbitalElements {
    pub fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination: f64,
        raan: f64,
        arg_of_periapsis: f64,
    ) -> Result<Self> {
        let elements = Self {
            semi_major_axis,
            eccentricity,
            inclination,
            raan,
            arg_of_periapsis,
        };
        elements.validate()?;
        Ok(elements)
    }

    /// Circular, equatorial orbit of radius `radius_km`
    pub fn circular(radius_km: f64) -> Result<Self> {
        Self::new(radius_km, 0.0, 0.0, 0.0, 0.0)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.semi_major_axis.is_finite() && self.semi_major_axis > 0.0) {
            return Err(GridError::Configuration(format!(
                "semi-major axis must be positive, got {} km",
                self.semi_major_axis
            )));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(GridError::Configuration(format!(
                "eccentricity must be in [0, 1), got {}",
                self.eccentricity
            )));
        }
        let angles = [self.inclination, self.raan, self.arg_of_periapsis];
        if angles.iter().any(|a| !a.is_finite()) {
            return Err(GridError::Configuration(format!(
                "orientation angles must be finite, got {:?}",
                angles
            )));
        }
        Ok(())
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn inclination(&self) -> f64 {
        self.inclination
    }

    pub fn raan(&self) -> f64 {
        self.raan
    }

    pub fn arg_of_periapsis(&self) -> f64 {
        self.arg_of_periapsis
    }

    /// Position (km) at `t` seconds after periapsis passage.
    pub fn position_at(&self, t: f64, mu: f64) -> Result<Vec3> {
        position_at(
            self.semi_major_axis,
            self.eccentricity,
            self.inclination,
            self.raan,
            self.arg_of_periapsis,
            t,
            mu,
        )
    }

    pub fn period(&self, mu: f64) -> Result<f64> {
        orbital_period(self.semi_major_axis, mu)
    }
}

pub(crate) fn validate_mu(mu: f64) -> Result<()> {
    if mu.is_finite() && mu > 0.0 {
        Ok(())
    } else {
        Err(GridError::Configuration(format!(
            "gravitational parameter must be positive, got {} km^3/s^2",
            mu
        )))
    }
}

/// Orbital period (s)
pub fn orbital_period(a: f64, mu: f64) -> Result<f64> {
    validate_mu(mu)?;
    if !(a.is_finite() && a > 0.0) {
        return Err(GridError::Configuration(format!(
            "semi-major axis must be positive, got {} km",
            a
        )));
    }
    Ok(2.0 * PI * (a.powi(3) / mu).sqrt())
}

/// Solve M = E - e sin E for the eccentric anomaly (radians).
pub fn solve_kepler(mean_anomaly: f64, e: f64) -> Result<f64> {
    let mut ecc = if e < 0.8 {
        mean_anomaly
    } else {
        PI.copysign(mean_anomaly)
    };

    for _ in 0..KEPLER_MAX_ITERATIONS {
        let f = ecc - e * ecc.sin() - mean_anomaly;
        if f.abs() < KEPLER_TOLERANCE {
            return Ok(ecc);
        }
        ecc -= f / (1.0 - e * ecc.cos());
    }

    Err(GridError::Numerical {
        mean_anomaly,
        eccentricity: e,
        iterations: KEPLER_MAX_ITERATIONS,
    })
}

/// Eccentric anomaly to true anomaly (radians).
pub fn true_anomaly(eccentric_anomaly: f64, e: f64) -> f64 {
    let half = eccentric_anomaly / 2.0;
    2.0 * ((1.0 + e).sqrt() * half.sin()).atan2((1.0 - e).sqrt() * half.cos())
}

/// Wrap to [-π, π]
fn wrap_angle(x: f64) -> f64 {
    (x + PI).rem_euclid(2.0 * PI) - PI
}

/// Inertial position (km) at `t` seconds after periapsis.
///
/// Angles `i`, `raan`, `om` are in degrees. The perifocal position is taken
/// to the inertial frame by Rz(raan) · Rx(i) · Rz(om).
pub fn position_at(a: f64, e: f64, i: f64, raan: f64, om: f64, t: f64, mu: f64) -> Result<Vec3> {
    OrbitalElements {
        semi_major_axis: a,
        eccentricity: e,
        inclination: i,
        raan,
        arg_of_periapsis: om,
    }
    .validate()?;
    validate_mu(mu)?;

    let mean_motion = (mu / a.powi(3)).sqrt();
    let mean_anomaly = wrap_angle(mean_motion * t);

    let ecc = solve_kepler(mean_anomaly, e)?;
    let nu = true_anomaly(ecc, e);
    let r = a * (1.0 - e * ecc.cos());

    let perifocal = Vec3::new(r * nu.cos(), r * nu.sin(), 0.0);
    let v = rotate_z(&perifocal, om);
    let v = rotate_x(&v, i);
    Ok(rotate_z(&v, raan))
}
