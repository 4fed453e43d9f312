//! Per-cell visibility over a built instance grid.
//!
//! Extracts frustum planes from a view-projection matrix and tests every
//! cell's bounding sphere against them (plus an optional eye-distance
//! cutoff), yielding the surviving cells' instance ranges. The renderer
//! turns each range into one instanced draw over the grid's cell-major
//! arrays.

use glam::{Mat4, Vec3, Vec4};

use crate::grid::InstanceGrid;

/// A clipping plane as `(normal, distance)` with the plane equation
/// `n · p + d = 0`; the normal points into the positive half-space.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Unit normal pointing into the positive half-space.
    pub normal: Vec3,
    /// Signed distance from origin.
    pub distance: f32,
}

impl Plane {
    /// Create a plane from raw coefficients and normalize it.
    #[must_use]
    pub fn from_coefficients(v: Vec4) -> Self {
        let len = v.truncate().length();
        if len > 0.0 {
            Self {
                normal: v.truncate() / len,
                distance: v.w / len,
            }
        } else {
            Self {
                normal: Vec3::ZERO,
                distance: 0.0,
            }
        }
    }

    /// Signed distance from `point` to the plane (negative = behind).
    #[inline]
    #[must_use]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// View frustum as six inward-facing clipping planes.
#[derive(Debug, Clone)]
pub struct Frustum {
    /// Left, right, bottom, top, near, far.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix using the
    /// Gribb/Hartmann method, for a right-handed system with `[0, 1]`
    /// depth range (wgpu/Vulkan conventions).
    #[must_use]
    pub fn from_view_projection(vp: Mat4) -> Self {
        let t = vp.transpose();
        let (row0, row1, row2, row3) =
            (t.x_axis, t.y_axis, t.z_axis, t.w_axis);
        Self {
            planes: [
                Plane::from_coefficients(row3 + row0),
                Plane::from_coefficients(row3 - row0),
                Plane::from_coefficients(row3 + row1),
                Plane::from_coefficients(row3 - row1),
                // [0,1] depth: the near plane is row2 itself.
                Plane::from_coefficients(row2),
                Plane::from_coefficients(row3 - row2),
            ],
        }
    }

    /// Whether a sphere intersects or is inside the frustum.
    #[inline]
    #[must_use]
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|p| p.distance_to_point(center) >= -radius)
    }
}

/// One visible cell's slice of the cell-major instance arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBatch {
    /// Occupied-cell index into the grid.
    pub cell: u32,
    /// First instance of the cell in cell-major order.
    pub start: u32,
    /// Number of instances in the cell.
    pub count: u32,
}

/// Collect the cells of `grid` whose bounding spheres survive frustum and
/// distance culling.
///
/// A cell survives when its sphere intersects `frustum` and, if
/// `max_distance` is finite, when the sphere reaches within
/// `max_distance` of `eye`. Cells come back in grid order; an empty grid
/// yields no batches.
#[must_use]
pub fn visible_cells(
    grid: &InstanceGrid,
    frustum: &Frustum,
    eye: Vec3,
    max_distance: f32,
) -> Vec<CellBatch> {
    let mut batches = Vec::new();
    for i in 0..grid.cell_count() {
        let sphere = grid.cell_sphere(i);
        if !frustum.intersects_sphere(sphere.center, sphere.radius) {
            continue;
        }
        if eye.distance(sphere.center) - sphere.radius > max_distance {
            continue;
        }
        let range = grid.cell_range(i);
        batches.push(CellBatch {
            cell: i as u32,
            start: range.start as u32,
            count: (range.end - range.start) as u32,
        });
    }
    batches
}
