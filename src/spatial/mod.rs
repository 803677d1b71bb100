//! Spatial data structures
//!
//! This module contains the token grid, positions and the adjacency
//! predicate used to validate swaps.

/// Grid storage, positions and bounds handling
pub mod grid;

pub use grid::{Grid, Position};
