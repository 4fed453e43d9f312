//! Bounding sphere primitive and aggregation over transform sets.

use glam::{Mat4, Vec3};

/// A bounding sphere in single precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere3D {
    /// Sphere center.
    pub center: Vec3,
    /// Sphere radius.
    pub radius: f32,
}

impl Sphere3D {
    /// Create a sphere from center and radius.
    #[must_use]
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Serialize as `[cx, cy, cz, r]` into `out` starting at `offset`.
    ///
    /// Writes nothing if the 4-float slot does not fit.
    pub fn write_to(&self, out: &mut [f32], offset: usize) {
        if let Some(slot) = out.get_mut(offset..offset + 4) {
            slot[0] = self.center.x;
            slot[1] = self.center.y;
            slot[2] = self.center.z;
            slot[3] = self.radius;
        }
    }

    /// Whether `other` lies inside `self` within a relative tolerance.
    #[must_use]
    pub fn contains_sphere(&self, other: &Self, tolerance: f32) -> bool {
        let slack = tolerance * self.radius.max(1.0);
        self.center.distance(other.center) + other.radius
            <= self.radius + slack
    }
}

/// Maximum axis scale of the linear part of a transform.
///
/// 1.0 for rigid transforms; larger when the matrix carries scale. A
/// singular matrix simply yields a scale of 0 along the collapsed axis, so
/// degenerate transforms never fail here.
fn max_axis_scale(m: &Mat4) -> f32 {
    m.x_axis
        .truncate()
        .length()
        .max(m.y_axis.truncate().length())
        .max(m.z_axis.truncate().length())
}

/// Sphere enclosing every copy of `invariant` placed by `transforms`.
///
/// `transforms` holds 16 floats per copy in [`glam`] column-major order.
/// Each copy's radius is the invariant radius scaled by the transform's
/// maximum axis scale, so affine transforms are bounded conservatively.
/// Returns `invariant` unchanged when `transforms` is empty.
#[must_use]
pub fn transformed_bounding_sphere(
    invariant: &Sphere3D,
    transforms: &[f32],
) -> Sphere3D {
    let count = transforms.len() / 16;
    if count == 0 {
        return *invariant;
    }

    let mut copies = Vec::with_capacity(count);
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for chunk in transforms.chunks_exact(16) {
        let m = Mat4::from_cols_slice(chunk);
        let center = m.transform_point3(invariant.center);
        let radius = invariant.radius * max_axis_scale(&m);
        min = min.min(center);
        max = max.max(center);
        copies.push((center, radius));
    }

    let center = (min + max) * 0.5;
    let mut radius = 0.0f32;
    for (c, r) in copies {
        radius = radius.max(center.distance(c) + r);
    }
    Sphere3D::new(center, radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translation(x: f32, y: f32, z: f32) -> [f32; 16] {
        Mat4::from_translation(Vec3::new(x, y, z)).to_cols_array()
    }

    #[test]
    fn test_single_transform_preserves_sphere() {
        let sphere = Sphere3D::new(Vec3::new(1.0, 2.0, 3.0), 0.5);
        let t = translation(10.0, 0.0, 0.0);
        let s = transformed_bounding_sphere(&sphere, &t);
        assert!((s.center - Vec3::new(11.0, 2.0, 3.0)).length() < 1e-6);
        assert!((s.radius - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_two_copies_enclosed() {
        let sphere = Sphere3D::new(Vec3::ZERO, 1.0);
        let mut transforms = Vec::new();
        transforms.extend_from_slice(&translation(-2.0, 0.0, 0.0));
        transforms.extend_from_slice(&translation(2.0, 0.0, 0.0));
        let s = transformed_bounding_sphere(&sphere, &transforms);
        assert!(s.center.length() < 1e-6);
        // Must reach from the midpoint to the far edge of either copy.
        assert!((s.radius - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_scaled_transform_grows_radius() {
        let sphere = Sphere3D::new(Vec3::ZERO, 1.0);
        let t = Mat4::from_scale(Vec3::new(3.0, 1.0, 1.0)).to_cols_array();
        let s = transformed_bounding_sphere(&sphere, &t);
        assert!((s.radius - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_singular_transform_does_not_fail() {
        let sphere = Sphere3D::new(Vec3::new(1.0, 0.0, 0.0), 0.5);
        // Collapse everything onto the YZ plane, then translate.
        let m = Mat4::from_translation(Vec3::new(0.0, 4.0, 0.0))
            * Mat4::from_scale(Vec3::new(0.0, 1.0, 1.0));
        let s = transformed_bounding_sphere(&sphere, &m.to_cols_array());
        assert!((s.center - Vec3::new(0.0, 4.0, 0.0)).length() < 1e-6);
        assert!((s.radius - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_contains_sphere() {
        let outer = Sphere3D::new(Vec3::ZERO, 2.0);
        let inner = Sphere3D::new(Vec3::new(1.0, 0.0, 0.0), 1.0);
        assert!(outer.contains_sphere(&inner, 1e-4));
        let outside = Sphere3D::new(Vec3::new(2.0, 0.0, 0.0), 1.0);
        assert!(!outer.contains_sphere(&outside, 1e-4));
    }

    #[test]
    fn test_write_to() {
        let s = Sphere3D::new(Vec3::new(1.0, 2.0, 3.0), 4.0);
        let mut out = [0.0f32; 8];
        s.write_to(&mut out, 4);
        assert_eq!(&out[4..], &[1.0, 2.0, 3.0, 4.0]);
    }
}
