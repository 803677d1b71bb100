//! Clearing, gravity and refill
//!
//! Gravity is applied per column and only relocates tokens, so the multiset
//! of tokens in a column is unchanged until refill. Refill visits columns left
//! to right and each column top to bottom, drawing one token per empty cell.

use bitvec::prelude::*;

use crate::algorithm::matching::Match;
use crate::algorithm::source::TokenSource;
use crate::io::error::{BoardError, Result};
use crate::spatial::grid::Grid;

/// Cell counts from one clear/gravity/refill pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettleReport {
    /// Cells emptied by the clear step
    pub cleared: usize,
    /// Tokens drawn from the source by the refill step
    pub refilled: usize,
}

/// Empty every cell covered by any match
///
/// Positions shared by several matches are cleared once. Returns the number
/// of cells that held a token before clearing.
pub fn clear_matches<T>(grid: &mut Grid<T>, matches: &[Match<T>]) -> usize {
    let width = grid.width();
    let mut marked = bitvec![0; width * grid.height()];

    for position in matches.iter().flat_map(|m| m.positions.iter()) {
        if let Some([row, col]) = grid.index_of(*position) {
            marked.set(row * width + col, true);
        }
    }

    let cells = grid.cells_mut();
    let mut cleared = 0;
    for flat in marked.iter_ones() {
        let taken = cells
            .get_mut([flat / width, flat % width])
            .and_then(Option::take);
        if taken.is_some() {
            cleared += 1;
        }
    }
    cleared
}

/// Slide tokens down each column so all gaps end up at the top
///
/// Relative top-to-bottom order of the surviving tokens is preserved.
pub fn apply_gravity<T>(grid: &mut Grid<T>) {
    let (height, width) = grid.dimensions();
    let cells = grid.cells_mut();

    for col in 0..width {
        let mut write_row = height;
        for row in (0..height).rev() {
            let occupied = cells.get([row, col]).is_some_and(Option::is_some);
            if !occupied {
                continue;
            }
            write_row -= 1;
            if write_row == row {
                continue;
            }
            let token = cells.get_mut([row, col]).and_then(Option::take);
            if let Some(slot) = cells.get_mut([write_row, col]) {
                *slot = token;
            }
        }
    }
}

/// Fill every empty cell from the source
///
/// Returns the number of tokens drawn; a full grid draws nothing.
///
/// # Errors
///
/// Returns `SourceExhausted` if the source runs dry. Cells visited before the
/// failure keep their new tokens.
pub fn refill<T, S>(grid: &mut Grid<T>, source: &mut S) -> Result<usize>
where
    S: TokenSource<T> + ?Sized,
{
    let (height, width) = grid.dimensions();
    let cells = grid.cells_mut();
    let mut drawn = 0;

    for col in 0..width {
        for row in 0..height {
            let Some(slot) = cells.get_mut([row, col]) else {
                continue;
            };
            if slot.is_some() {
                continue;
            }
            let token = source
                .next_token()
                .ok_or(BoardError::SourceExhausted { drawn })?;
            *slot = Some(token);
            drawn += 1;
        }
    }

    Ok(drawn)
}

/// Run clear, gravity and refill for one batch of matches
///
/// # Errors
///
/// Propagates `SourceExhausted` from the refill step.
pub fn collapse_and_refill<T, S>(
    grid: &mut Grid<T>,
    matches: &[Match<T>],
    source: &mut S,
) -> Result<SettleReport>
where
    S: TokenSource<T> + ?Sized,
{
    let cleared = clear_matches(grid, matches);
    if cleared > 0 {
        apply_gravity(grid);
    }
    let refilled = refill(grid, source)?;

    Ok(SettleReport { cleared, refilled })
}
