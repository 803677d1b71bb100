//! Token sources feeding board construction and refill
//!
//! A source is the single stateful collaborator of the engine. Draws happen
//! only from inside the engine, in a fixed documented order, so a seeded or
//! scripted source makes every board reproducible.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::io::error::{Result, invalid_parameter};

/// Produces the next token on demand
///
/// Returning `None` signals exhaustion, which the engine reports as a fatal
/// `SourceExhausted` error for the operation in progress.
pub trait TokenSource<T> {
    /// Draw the next token
    fn next_token(&mut self) -> Option<T>;
}

impl<T, F> TokenSource<T> for F
where
    F: FnMut() -> Option<T>,
{
    fn next_token(&mut self) -> Option<T> {
        self()
    }
}

/// Seeded uniform choice over a fixed palette
#[derive(Debug, Clone)]
pub struct RandomSource<T> {
    palette: Vec<T>,
    rng: StdRng,
}

impl<T: Clone> RandomSource<T> {
    /// Create a deterministic source over the given palette
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the palette is empty
    pub fn new(palette: Vec<T>, seed: u64) -> Result<Self> {
        if palette.is_empty() {
            return Err(invalid_parameter(
                "palette",
                &0,
                &"a random source needs at least one token",
            ));
        }

        Ok(Self {
            palette,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Tokens this source can produce
    pub fn palette(&self) -> &[T] {
        &self.palette
    }
}

impl<T: Clone> TokenSource<T> for RandomSource<T> {
    fn next_token(&mut self) -> Option<T> {
        let index = self.rng.random_range(0..self.palette.len());
        self.palette.get(index).cloned()
    }
}

/// Always yields the same token
#[derive(Debug, Clone)]
pub struct ConstantSource<T> {
    token: T,
}

impl<T> ConstantSource<T> {
    /// Create a source repeating `token` forever
    pub const fn new(token: T) -> Self {
        Self { token }
    }
}

impl<T: Clone> TokenSource<T> for ConstantSource<T> {
    fn next_token(&mut self) -> Option<T> {
        Some(self.token.clone())
    }
}

/// Cycles through a fixed sequence forever
#[derive(Debug, Clone)]
pub struct CycleSource<T> {
    sequence: Vec<T>,
    cursor: usize,
}

impl<T> CycleSource<T> {
    /// Create a cycling source; an empty sequence is exhausted immediately
    pub const fn new(sequence: Vec<T>) -> Self {
        Self {
            sequence,
            cursor: 0,
        }
    }
}

impl<T: Clone> TokenSource<T> for CycleSource<T> {
    fn next_token(&mut self) -> Option<T> {
        let token = self.sequence.get(self.cursor).cloned()?;
        self.cursor = (self.cursor + 1) % self.sequence.len();
        Some(token)
    }
}

/// Yields a scripted sequence once, then reports exhaustion
#[derive(Debug, Clone, Default)]
pub struct QueueSource<T> {
    queue: VecDeque<T>,
    drawn: usize,
}

impl<T> QueueSource<T> {
    /// Create a source that yields `tokens` in order
    pub fn new(tokens: impl IntoIterator<Item = T>) -> Self {
        Self {
            queue: tokens.into_iter().collect(),
            drawn: 0,
        }
    }

    /// Tokens still queued
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Tokens handed out so far
    pub const fn drawn(&self) -> usize {
        self.drawn
    }
}

impl<T> TokenSource<T> for QueueSource<T> {
    fn next_token(&mut self) -> Option<T> {
        let token = self.queue.pop_front()?;
        self.drawn += 1;
        Some(token)
    }
}
