//! Instance spatial grid builder.
//!
//! Turns a flat per-instance transform set into a cell-major layout: ids
//! and transforms reordered so that instances sharing a grid cell are
//! contiguous, with one bounding sphere per occupied cell. The renderer
//! slices these arrays per cell for coarse culling and batched instanced
//! draws.

use glam::{Mat4, Vec3};

use crate::{
    error::GridError,
    geometry::{
        boundary::get_boundary,
        sphere::{transformed_bounding_sphere, Sphere3D},
        PositionData,
    },
    lookup::GridLookup,
};

/// Borrowed snapshot of per-instance data.
///
/// All instances share one base geometry and its local bounding sphere;
/// each instance places a copy of it via a 4×4 transform. The builder only
/// reads these buffers and never retains them.
#[derive(Debug, Clone, Copy)]
pub struct InstanceData<'a> {
    /// Number of instances.
    pub instance_count: usize,
    /// One numeric id per instance; length `instance_count`.
    pub instance: &'a [f32],
    /// 16 floats per instance in [`glam`] column-major order; length
    /// `instance_count * 16`.
    pub transform: &'a [f32],
    /// Bounding sphere of the base geometry in local space, shared by
    /// every instance.
    pub invariant_bounding_sphere: Sphere3D,
}

/// Immutable cell-major instance layout.
///
/// Built once from an [`InstanceData`] snapshot and discarded on the next
/// rebuild; never mutated in place. All arrays are freshly allocated, so
/// the value can move to another owner (e.g. a render thread) without
/// aliasing the caller's buffers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstanceGrid {
    cell_size: f32,
    cell_count: usize,
    cell_offsets: Vec<u32>,
    cell_spheres: Vec<f32>,
    cell_transform: Vec<f32>,
    cell_instance: Vec<f32>,
}

impl InstanceGrid {
    /// The empty grid: zero cells, zero instances, all arrays zero-length.
    ///
    /// The default value until a representation first needs a grid, and
    /// the result of building from zero instances.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Cell edge length; 0 for the empty grid.
    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Total number of instances across all cells.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.cell_instance.len()
    }

    /// Start offsets of each cell's instance run, with a final sentinel
    /// equal to the total instance count; length `cell_count + 1`
    /// (zero-length for the empty grid).
    #[must_use]
    pub fn cell_offsets(&self) -> &[u32] {
        &self.cell_offsets
    }

    /// Per-cell bounding spheres as `[cx, cy, cz, r]`; length
    /// `cell_count * 4`.
    #[must_use]
    pub fn cell_spheres(&self) -> &[f32] {
        &self.cell_spheres
    }

    /// Instance transforms in cell-major order; length
    /// `instance_count * 16`.
    #[must_use]
    pub fn cell_transform(&self) -> &[f32] {
        &self.cell_transform
    }

    /// Instance ids in cell-major order, parallel to [`cell_transform`].
    ///
    /// [`cell_transform`]: Self::cell_transform
    #[must_use]
    pub fn cell_instance(&self) -> &[f32] {
        &self.cell_instance
    }

    /// Bounding sphere of occupied cell `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.cell_count()`.
    #[must_use]
    pub fn cell_sphere(&self, i: usize) -> Sphere3D {
        let s = &self.cell_spheres[i * 4..i * 4 + 4];
        Sphere3D::new(Vec3::new(s[0], s[1], s[2]), s[3])
    }

    /// Instance index range of occupied cell `i` into the cell-major
    /// arrays.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.cell_count()`.
    #[must_use]
    pub fn cell_range(&self, i: usize) -> std::ops::Range<usize> {
        self.cell_offsets[i] as usize..self.cell_offsets[i + 1] as usize
    }

    /// Cell-major transform data as bytes, ready for GPU buffer upload.
    #[must_use]
    pub fn cell_transform_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cell_transform)
    }

    /// Cell-major instance ids as bytes, ready for GPU buffer upload.
    #[must_use]
    pub fn cell_instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cell_instance)
    }

    /// Per-cell bounding spheres as bytes, ready for GPU buffer upload.
    #[must_use]
    pub fn cell_spheres_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cell_spheres)
    }
}

/// Validate `data` and `cell_size` before any allocation.
fn validate(data: &InstanceData<'_>, cell_size: f32) -> Result<(), GridError> {
    let n = data.instance_count;
    if n > 0 && cell_size <= 0.0 {
        return Err(GridError::InvalidCellSize { cell_size });
    }
    if data.instance.len() != n {
        return Err(GridError::InstanceLength {
            expected: n,
            actual: data.instance.len(),
        });
    }
    if data.transform.len() != n * 16 {
        return Err(GridError::TransformLength {
            expected: n * 16,
            actual: data.transform.len(),
        });
    }
    Ok(())
}

/// Build a cell-major instance grid from `data` with cubic cells of edge
/// `cell_size`.
///
/// Transforms the invariant sphere center by every instance transform,
/// buckets the resulting world-space centers into a uniform grid, then
/// copies ids and transforms into cell-major order and aggregates one
/// bounding sphere per occupied cell. Zero instances yield a grid equal to
/// [`InstanceGrid::empty`].
///
/// Cell offsets come from a running write cursor, not from the bucket
/// structure's internal offsets, so bucket return order is irrelevant and
/// the zero-cell case needs no special handling.
///
/// # Errors
///
/// Returns [`GridError`] when `cell_size` is non-positive with a nonzero
/// instance count, or when the id or transform array length does not match
/// `instance_count`. Validation happens before any output allocation.
pub fn calc_instance_grid(
    data: &InstanceData<'_>,
    cell_size: f32,
) -> Result<InstanceGrid, GridError> {
    validate(data, cell_size)?;

    let n = data.instance_count;
    if n == 0 {
        return Ok(InstanceGrid::empty());
    }

    // World-space instance centers: invariant sphere center through each
    // instance transform, as three parallel coordinate arrays.
    let local_center = data.invariant_bounding_sphere.center;
    let mut x = vec![0.0f32; n];
    let mut y = vec![0.0f32; n];
    let mut z = vec![0.0f32; n];
    for (i, chunk) in data.transform.chunks_exact(16).enumerate() {
        let c = Mat4::from_cols_slice(chunk).transform_point3(local_center);
        x[i] = c.x;
        y[i] = c.y;
        z[i] = c.z;
    }

    let positions = PositionData {
        x: &x,
        y: &y,
        z: &z,
    };
    let boundary = get_boundary(&positions);
    let lookup =
        GridLookup::build(&positions, &boundary, Vec3::splat(cell_size));

    let cell_count = lookup.bucket_count();
    let mut cell_offsets = vec![0u32; cell_count + 1];
    let mut cell_spheres = vec![0.0f32; cell_count * 4];
    let mut cell_transform = vec![0.0f32; n * 16];
    let mut cell_instance = vec![0.0f32; n];

    // Running write cursor into the cell-major arrays.
    let mut k = 0usize;
    for i in 0..cell_count {
        cell_offsets[i] = k as u32;
        let k_start = k;
        for &idx in lookup.run(i) {
            let idx = idx as usize;
            cell_instance[k] = data.instance[idx];
            cell_transform[k * 16..k * 16 + 16]
                .copy_from_slice(&data.transform[idx * 16..idx * 16 + 16]);
            k += 1;
        }
        let sphere = transformed_bounding_sphere(
            &data.invariant_bounding_sphere,
            &cell_transform[k_start * 16..k * 16],
        );
        sphere.write_to(&mut cell_spheres, i * 4);
    }
    cell_offsets[cell_count] = k as u32;

    log::debug!(
        "instance grid: {n} instances in {cell_count} cells \
         (cell size {cell_size})"
    );

    Ok(InstanceGrid {
        cell_size,
        cell_count,
        cell_offsets,
        cell_spheres,
        cell_transform,
        cell_instance,
    })
}
