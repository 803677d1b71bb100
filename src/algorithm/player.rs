//! Seeded move picker and per-game tallies for simulated play

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::engine::BoardEvent;
use crate::spatial::grid::Position;

/// Picks legal swaps uniformly at random
///
/// Every orthogonally adjacent in-bounds pair is equally likely. Horizontal
/// pairs are numbered first, row by row, then vertical pairs.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    /// Create a deterministic player
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose a swap on a `width` x `height` board
    ///
    /// Returns `None` for a 1x1 board, which has no adjacent pairs.
    pub fn pick_move(&mut self, width: usize, height: usize) -> Option<(Position, Position)> {
        let horizontal = height * width.saturating_sub(1);
        let vertical = width * height.saturating_sub(1);
        let total = horizontal + vertical;
        if total == 0 {
            return None;
        }

        let choice = self.rng.random_range(0..total);
        let pair = if choice < horizontal {
            let per_row = width - 1;
            let first = Position::new((choice / per_row) as i32, (choice % per_row) as i32);
            (first, first.offset(0, 1))
        } else {
            let index = choice - horizontal;
            let first = Position::new((index / width) as i32, (index % width) as i32);
            (first, first.offset(1, 0))
        };
        Some(pair)
    }
}

/// Aggregate statistics for one simulated game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameSummary {
    /// Moves applied
    pub moves: usize,
    /// Moves that produced at least one match
    pub matching_moves: usize,
    /// Match events observed
    pub matches: usize,
    /// Cells covered by match events (shared cells counted per match)
    pub tokens_matched: usize,
    /// Settle passes observed (refill events)
    pub settle_passes: usize,
    /// Non-matching swaps that were undone
    pub reverted: usize,
}

impl GameSummary {
    /// Fold the events of one move into the tally
    pub fn record<T>(&mut self, events: &[BoardEvent<T>], revert_on_no_match: bool) {
        self.moves += 1;

        let mut matched = false;
        for event in events {
            match event {
                BoardEvent::Match(found) => {
                    matched = true;
                    self.matches += 1;
                    self.tokens_matched += found.len();
                }
                BoardEvent::Refill => self.settle_passes += 1,
            }
        }

        if matched {
            self.matching_moves += 1;
        } else if revert_on_no_match {
            self.reverted += 1;
        }
    }

    /// Combine two tallies
    #[must_use]
    pub const fn merged(self, other: Self) -> Self {
        Self {
            moves: self.moves + other.moves,
            matching_moves: self.matching_moves + other.matching_moves,
            matches: self.matches + other.matches,
            tokens_matched: self.tokens_matched + other.tokens_matched,
            settle_passes: self.settle_passes + other.settle_passes,
            reverted: self.reverted + other.reverted,
        }
    }
}
