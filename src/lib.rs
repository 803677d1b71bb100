//! Tile-matching board engine with swap, run detection, gravity and refill
//!
//! A board holds a fixed grid of tokens drawn from a pluggable source. Each
//! move swaps two adjacent cells, clears every run of three or more identical
//! tokens, collapses the survivors downward and refills the gaps, reporting
//! what happened as an ordered list of events.

#![forbid(unsafe_code)]

/// Match detection, collapse/refill, token sources and the move orchestrator
pub mod algorithm;
/// Command-line interface, configuration, error handling and transcripts
pub mod io;
/// Grid storage and positional queries
pub mod spatial;

pub use algorithm::engine::{Board, BoardConfig, BoardEvent};
pub use algorithm::matching::{Match, ScanDirection};
pub use algorithm::source::TokenSource;
pub use io::error::{BoardError, Result};
pub use spatial::grid::{Cell, Grid, Position, can_move};
