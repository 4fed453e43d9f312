//! Geometry primitives shared by the grid builder.

pub mod boundary;
pub mod sphere;

pub use boundary::Boundary;
pub use sphere::Sphere3D;

/// A point set as three parallel coordinate slices.
///
/// Positional data stays in the caller's buffers; consumers index all three
/// slices with the same point index. All slices must have equal length.
#[derive(Debug, Clone, Copy)]
pub struct PositionData<'a> {
    /// X coordinates.
    pub x: &'a [f32],
    /// Y coordinates.
    pub y: &'a [f32],
    /// Z coordinates.
    pub z: &'a [f32],
}

impl PositionData<'_> {
    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len()).min(self.z.len())
    }

    /// Whether the point set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
