//! Run detection over the grid
//!
//! A run is a maximal sequence of equal, non-empty tokens along one line.
//! Runs of at least `MIN_MATCH_LENGTH` are reported whole: a 5-run is one
//! match, never two overlapping 3-runs.

use crate::io::configuration::MIN_MATCH_LENGTH;
use crate::spatial::grid::{Cell, Grid, Position};

/// Lines examined by the match finder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanDirection {
    /// Horizontal runs only
    #[default]
    Rows,
    /// Horizontal runs, then vertical runs
    RowsAndColumns,
}

impl ScanDirection {
    /// Whether vertical runs are reported
    pub const fn includes_columns(self) -> bool {
        matches!(self, Self::RowsAndColumns)
    }
}

/// A detected run: the matched token and the positions it covers in scan order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<T> {
    /// Token shared by every position in the run
    pub token: T,
    /// Covered positions, left-to-right for rows and top-to-bottom for columns
    pub positions: Vec<Position>,
}

impl<T> Match<T> {
    /// Number of cells in the run
    pub const fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false for matches produced by `find_matches`
    pub const fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Find every maximal run of `MIN_MATCH_LENGTH` or more identical tokens
///
/// Rows are scanned top to bottom, each left to right. With
/// `ScanDirection::RowsAndColumns` the column runs follow, columns left to
/// right, each top to bottom. A cell may appear in both a row and a column
/// match.
pub fn find_matches<T>(grid: &Grid<T>, scan: ScanDirection) -> Vec<Match<T>>
where
    T: Clone + PartialEq,
{
    let mut matches = Vec::new();

    for row in 0..grid.height() {
        collect_runs(grid.row(row), &mut matches, |index| {
            Position::new(row as i32, index as i32)
        });
    }

    if scan.includes_columns() {
        for col in 0..grid.width() {
            collect_runs(grid.column(col), &mut matches, |index| {
                Position::new(index as i32, col as i32)
            });
        }
    }

    matches
}

// Walks one line, closing the current run whenever the token changes
fn collect_runs<'a, T, I, P>(line: I, matches: &mut Vec<Match<T>>, position_at: P)
where
    T: Clone + PartialEq + 'a,
    I: Iterator<Item = &'a Cell<T>>,
    P: Fn(usize) -> Position,
{
    let mut run_token: Option<&T> = None;
    let mut run_start = 0;
    let mut line_length = 0;

    for (index, cell) in line.enumerate() {
        line_length = index + 1;
        if cell.is_some() && cell.as_ref() == run_token {
            continue;
        }
        emit_run(run_token, run_start, index, matches, &position_at);
        run_token = cell.as_ref();
        run_start = index;
    }

    emit_run(run_token, run_start, line_length, matches, &position_at);
}

fn emit_run<T, P>(
    token: Option<&T>,
    start: usize,
    end: usize,
    matches: &mut Vec<Match<T>>,
    position_at: &P,
) where
    T: Clone,
    P: Fn(usize) -> Position,
{
    let Some(token) = token else {
        return;
    };
    if end.saturating_sub(start) < MIN_MATCH_LENGTH {
        return;
    }

    matches.push(Match {
        token: token.clone(),
        positions: (start..end).map(position_at).collect(),
    });
}
