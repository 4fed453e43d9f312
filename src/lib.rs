// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Geometry math: intentional narrowing casts and exact float comparisons
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]

//! Cell-major instance spatial grid for GPU-instanced molecular rendering.
//!
//! Given thousands of placed copies of one base geometry (e.g. repeated
//! molecular units), each identified by an id and a 4×4 transform and all
//! sharing one local bounding sphere, this crate buckets the instances into
//! a uniform 3D grid and emits a cell-major layout: per-cell bounding
//! spheres for coarse visibility tests plus contiguous per-cell slices of
//! the transform and id arrays for batched instanced draws.
//!
//! # Key entry points
//!
//! - [`grid::calc_instance_grid`] - build an [`grid::InstanceGrid`] from an
//!   [`grid::InstanceData`] snapshot and a cell size
//! - [`cull::visible_cells`] - per-cell frustum/distance culling over a
//!   built grid, yielding instance ranges for draw batching
//! - [`geometry`] - bounding sphere and boundary primitives
//! - [`lookup`] - the uniform spatial bucket structure backing the builder
//!
//! The grid is an immutable value: callers rebuild it whenever the instance
//! set, its transforms, or the desired cell size change, and discard the
//! previous one. GPU submission itself is out of scope; the output arrays
//! expose [`bytemuck`]-cast byte views ready for buffer upload.

pub mod cull;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod lookup;

pub use error::GridError;
pub use grid::{calc_instance_grid, InstanceData, InstanceGrid};
