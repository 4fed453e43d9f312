//! Axis-aligned boundary computation over a point set.

use glam::Vec3;

use super::PositionData;

/// Axis-aligned bounding box of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Boundary {
    /// Degenerate boundary of an empty point set (both corners at origin).
    pub const EMPTY: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };

    /// Edge lengths along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Compute the tight axis-aligned boundary of `positions`.
///
/// Returns [`Boundary::EMPTY`] for an empty point set.
#[must_use]
pub fn get_boundary(positions: &PositionData<'_>) -> Boundary {
    let n = positions.len();
    if n == 0 {
        return Boundary::EMPTY;
    }
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for i in 0..n {
        let p = Vec3::new(positions.x[i], positions.y[i], positions.z[i]);
        min = min.min(p);
        max = max.max(p);
    }
    Boundary { min, max }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_of_points() {
        let x = [1.0, -2.0, 3.0];
        let y = [0.0, 5.0, -1.0];
        let z = [2.0, 2.0, 2.0];
        let b = get_boundary(&PositionData {
            x: &x,
            y: &y,
            z: &z,
        });
        assert_eq!(b.min, Vec3::new(-2.0, -1.0, 2.0));
        assert_eq!(b.max, Vec3::new(3.0, 5.0, 2.0));
        assert_eq!(b.size(), Vec3::new(5.0, 6.0, 0.0));
    }

    #[test]
    fn test_boundary_empty() {
        let b = get_boundary(&PositionData {
            x: &[],
            y: &[],
            z: &[],
        });
        assert_eq!(b, Boundary::EMPTY);
    }
}
