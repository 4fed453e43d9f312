//! Uniform 3D grid lookup over a point set.
//!
//! Buckets points into cubic cells of a given size and exposes only the
//! occupied cells, each as a contiguous run of point indices in a flat
//! array. Built in two passes: count points per cell, prefix-sum into run
//! offsets, then scatter indices into place.

use glam::Vec3;

use crate::geometry::{Boundary, PositionData};

/// Occupied-cell lookup over a point set.
///
/// The occupied cells exactly partition the point indices `0..n`: every
/// index appears in exactly one run. Run order is deterministic for
/// identical input but callers must not rely on runs being ordered by
/// their offsets into the flat array.
#[derive(Debug, Clone)]
pub struct GridLookup {
    array: Vec<u32>,
    bucket_offset: Vec<u32>,
    bucket_count: Vec<u32>,
}

impl GridLookup {
    /// Bucket `positions` into cells of edge lengths `cell_size`.
    ///
    /// `boundary` must enclose every point; points on the maximum face are
    /// clamped into the last cell along that axis. A non-positive cell
    /// size along an axis collapses that axis to a single cell. Zero
    /// points yield zero occupied cells.
    #[must_use]
    pub fn build(
        positions: &PositionData<'_>,
        boundary: &Boundary,
        cell_size: Vec3,
    ) -> Self {
        let n = positions.len();
        if n == 0 {
            return Self {
                array: Vec::new(),
                bucket_offset: Vec::new(),
                bucket_count: Vec::new(),
            };
        }

        let size = boundary.size();
        let dim = [
            grid_dim(size.x, cell_size.x),
            grid_dim(size.y, cell_size.y),
            grid_dim(size.z, cell_size.z),
        ];
        let cell_total = dim[0] * dim[1] * dim[2];

        // Pass 1: count points per cell.
        let mut counts = vec![0u32; cell_total];
        let mut cell_of = vec![0u32; n];
        for i in 0..n {
            let ix = axis_cell(positions.x[i], boundary.min.x, cell_size.x, dim[0]);
            let iy = axis_cell(positions.y[i], boundary.min.y, cell_size.y, dim[1]);
            let iz = axis_cell(positions.z[i], boundary.min.z, cell_size.z, dim[2]);
            let cell = ix + iy * dim[0] + iz * dim[0] * dim[1];
            cell_of[i] = cell as u32;
            counts[cell] += 1;
        }

        // Prefix-sum occupied cells into run offsets.
        let mut starts = vec![0u32; cell_total];
        let mut bucket_offset = Vec::new();
        let mut bucket_count = Vec::new();
        let mut cursor = 0u32;
        for cell in 0..cell_total {
            let count = counts[cell];
            if count == 0 {
                continue;
            }
            starts[cell] = cursor;
            bucket_offset.push(cursor);
            bucket_count.push(count);
            cursor += count;
        }

        // Pass 2: scatter point indices into their runs.
        let mut array = vec![0u32; n];
        for i in 0..n {
            let cell = cell_of[i] as usize;
            array[starts[cell] as usize] = i as u32;
            starts[cell] += 1;
        }

        Self {
            array,
            bucket_offset,
            bucket_count,
        }
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.bucket_offset.len()
    }

    /// The flat index array; a permutation of `0..n`.
    #[must_use]
    pub fn array(&self) -> &[u32] {
        &self.array
    }

    /// Point indices of occupied cell `i` as a contiguous run.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.bucket_count()`.
    #[must_use]
    pub fn run(&self, i: usize) -> &[u32] {
        let start = self.bucket_offset[i] as usize;
        let count = self.bucket_count[i] as usize;
        &self.array[start..start + count]
    }
}

/// Number of cells along one axis for the given extent and cell edge.
fn grid_dim(extent: f32, cell: f32) -> usize {
    if cell <= 0.0 || extent <= 0.0 {
        return 1;
    }
    ((extent / cell).ceil() as usize).max(1)
}

/// Cell index of a coordinate along one axis, clamped into the grid.
fn axis_cell(v: f32, min: f32, cell: f32, dim: usize) -> usize {
    if cell <= 0.0 {
        return 0;
    }
    let idx = ((v - min) / cell).floor();
    if idx < 0.0 {
        0
    } else {
        (idx as usize).min(dim - 1)
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::boundary::get_boundary;

    use super::*;

    fn build(x: &[f32], y: &[f32], z: &[f32], cell: f32) -> GridLookup {
        let positions = PositionData { x, y, z };
        let boundary = get_boundary(&positions);
        GridLookup::build(&positions, &boundary, Vec3::splat(cell))
    }

    /// Every input index appears in exactly one run.
    fn assert_partition(lookup: &GridLookup, n: usize) {
        let mut seen = vec![false; n];
        for i in 0..lookup.bucket_count() {
            for &idx in lookup.run(i) {
                assert!(!seen[idx as usize], "index {idx} appears twice");
                seen[idx as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s), "missing indices");
    }

    #[test]
    fn test_empty_point_set() {
        let lookup = build(&[], &[], &[], 1.0);
        assert_eq!(lookup.bucket_count(), 0);
        assert!(lookup.array().is_empty());
    }

    #[test]
    fn test_single_point() {
        let lookup = build(&[3.0], &[4.0], &[5.0], 1.0);
        assert_eq!(lookup.bucket_count(), 1);
        assert_eq!(lookup.run(0), &[0]);
    }

    #[test]
    fn test_two_clusters_on_x() {
        let x = [0.0, 1.0, 5.0, 6.0];
        let y = [0.0; 4];
        let z = [0.0; 4];
        let lookup = build(&x, &y, &z, 2.0);
        assert_eq!(lookup.bucket_count(), 2);
        assert_partition(&lookup, 4);

        let mut runs: Vec<Vec<u32>> = (0..2)
            .map(|i| {
                let mut r = lookup.run(i).to_vec();
                r.sort_unstable();
                r
            })
            .collect();
        runs.sort();
        assert_eq!(runs, vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn test_point_on_max_face_clamped() {
        // The second point sits exactly on the boundary maximum; it must
        // land in the last cell, not fall off the grid.
        let lookup = build(&[0.0, 4.0], &[0.0, 0.0], &[0.0, 0.0], 2.0);
        assert_partition(&lookup, 2);
        assert_eq!(lookup.bucket_count(), 2);
    }

    #[test]
    fn test_coincident_points_share_cell() {
        let x = [1.0; 5];
        let y = [2.0; 5];
        let z = [3.0; 5];
        let lookup = build(&x, &y, &z, 1.0);
        assert_eq!(lookup.bucket_count(), 1);
        assert_eq!(lookup.run(0).len(), 5);
        assert_partition(&lookup, 5);
    }

    #[test]
    fn test_partition_over_scattered_points() {
        let n = 100;
        let x: Vec<f32> = (0..n).map(|i| (i as f32 * 0.73).sin() * 20.0).collect();
        let y: Vec<f32> = (0..n).map(|i| (i as f32 * 1.31).cos() * 20.0).collect();
        let z: Vec<f32> = (0..n).map(|i| (i as f32 * 0.17).sin() * 20.0).collect();
        let lookup = build(&x, &y, &z, 3.0);
        assert_partition(&lookup, n);
    }
}
