//! Uniform spatial bucket structures for point sets.

pub mod grid;

pub use grid::GridLookup;
