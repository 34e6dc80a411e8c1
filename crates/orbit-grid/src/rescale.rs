//! Display cube rescaling

use crate::{GridError, Result, Vec3};

/// Rescaled batch and the uniform factor that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Rescaled {
    pub points: Vec<Vec3>,
    pub scale: f64,
}

fn check_half_extent(half_extent: f64) -> Result<()> {
    if half_extent.is_finite() && half_extent > 0.0 {
        Ok(())
    } else {
        Err(GridError::Configuration(format!(
            "cube half-extent must be positive, got {}",
            half_extent
        )))
    }
}

/// Largest absolute coordinate over the whole batch
pub fn max_abs_coordinate(points: &[Vec3]) -> f64 {
    points.iter().map(|p| p.amax()).fold(0.0, f64::max)
}

/// Scale the batch uniformly so its largest absolute coordinate equals `half_extent`.
///
/// An empty or all-zero batch comes back unchanged with `scale == 1.0`.
pub fn rescale(points: &[Vec3], half_extent: f64) -> Result<Rescaled> {
    check_half_extent(half_extent)?;

    let max = max_abs_coordinate(points);
    if max == 0.0 {
        return Ok(Rescaled {
            points: points.to_vec(),
            scale: 1.0,
        });
    }
    if !max.is_finite() {
        return Err(GridError::Configuration(format!(
            "cannot rescale non-finite coordinates (max {})",
            max
        )));
    }

    let scale = half_extent / max;
    Ok(Rescaled {
        points: points.iter().map(|p| p * scale).collect(),
        scale,
    })
}

/// Centre the bounding box on the origin, then [`rescale`].
pub fn rescale_centered(points: &[Vec3], half_extent: f64) -> Result<Rescaled> {
    let Some(first) = points.first() else {
        return rescale(points, half_extent);
    };

    let (lo, hi) = points
        .iter()
        .fold((*first, *first), |(lo, hi), p| (lo.inf(p), hi.sup(p)));
    let mid = (lo + hi) / 2.0;

    let centered: Vec<Vec3> = points.iter().map(|p| p - mid).collect();
    rescale(&centered, half_extent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_coordinate_hits_half_extent() {
        let points = vec![
            Vec3::new(7000.0, 0.0, 0.0),
            Vec3::new(0.0, -3500.0, 100.0),
            Vec3::new(-2000.0, 1000.0, -6500.0),
        ];
        let out = rescale(&points, 0.8).unwrap();

        assert!((max_abs_coordinate(&out.points) - 0.8).abs() < 1e-12);
        assert!((out.scale - 0.8 / 7000.0).abs() < 1e-18);
        // Shape preserved
        assert!((out.points[1].y / out.points[0].x + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_all_zero_input_unchanged() {
        let points = vec![Vec3::zeros(); 4];
        let out = rescale(&points, 1.0).unwrap();

        assert_eq!(out.points, points);
        assert_eq!(out.scale, 1.0);

        let empty = rescale(&[], 1.0).unwrap();
        assert!(empty.points.is_empty());
        assert_eq!(empty.scale, 1.0);
    }

    #[test]
    fn test_rejects_bad_half_extent() {
        assert!(matches!(
            rescale(&[Vec3::x()], 0.0),
            Err(GridError::Configuration(_))
        ));
        assert!(rescale(&[Vec3::x()], f64::NAN).is_err());
    }

    #[test]
    fn test_centered_bounding_box() {
        let points = vec![Vec3::new(10.0, 2.0, 0.0), Vec3::new(14.0, 6.0, 0.0)];
        let out = rescale_centered(&points, 1.0).unwrap();

        assert!((out.points[0] - Vec3::new(-1.0, -1.0, 0.0)).norm() < 1e-12);
        assert!((out.points[1] - Vec3::new(1.0, 1.0, 0.0)).norm() < 1e-12);
    }
}
