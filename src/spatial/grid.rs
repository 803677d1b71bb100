//! Fixed-size token grid with signed positional queries
//!
//! Cells are stored as `Option<T>` in an ndarray matrix indexed `[row, col]`.
//! Positions are signed so callers can probe past the edges without wrapping;
//! every lookup goes through `index_of`, which rejects anything outside the
//! grid before it reaches the array.

use std::fmt;

use ndarray::Array2;

use crate::io::configuration::{EMPTY_CELL_GLYPH, MAX_BOARD_DIMENSION};
use crate::io::error::{BoardError, Result};

/// A grid slot holding either a token or nothing
pub type Cell<T> = Option<T>;

/// Zero-indexed grid coordinate; rows grow downward, columns rightward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Row index
    pub row: i32,
    /// Column index
    pub col: i32,
}

impl Position {
    /// Create a position from row and column
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another position
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.row
            .abs_diff(other.row)
            .saturating_add(self.col.abs_diff(other.col))
    }

    /// Position offset by the given deltas
    #[must_use]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row.saturating_add(d_row),
            col: self.col.saturating_add(d_col),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Check whether two positions may be swapped
///
/// True iff they are orthogonally adjacent. Board bounds are not considered.
pub const fn can_move(first: Position, second: Position) -> bool {
    first.manhattan_distance(second) == 1
}

/// Rectangular grid of cells whose dimensions never change after construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Array2<Cell<T>>,
}

impl<T> Grid<T> {
    /// Build a grid by drawing one cell per position in row-major order
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if either dimension is zero or exceeds
    /// `MAX_BOARD_DIMENSION`, or propagates the first error from `fill`.
    pub fn try_from_fn<F>(width: usize, height: usize, mut fill: F) -> Result<Self>
    where
        F: FnMut(Position) -> Result<Cell<T>>,
    {
        validate_dimensions(width, height)?;

        let mut cells = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                cells.push(fill(Position::new(row as i32, col as i32))?);
            }
        }

        let cells = Array2::from_shape_vec((height, width), cells)
            .map_err(|_shape_error| BoardError::InvalidDimensions { width, height })?;
        Ok(Self { cells })
    }

    /// Build a grid from explicit rows (row 0 first)
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if there are no rows, a row is empty, or the
    /// rows differ in length.
    pub fn from_rows(rows: Vec<Vec<Cell<T>>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return Err(BoardError::InvalidDimensions { width, height });
        }

        let mut cells = rows.into_iter().flatten();
        Self::try_from_fn(width, height, |_| {
            cells
                .next()
                .ok_or(BoardError::InvalidDimensions { width, height })
        })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Grid dimensions as (height, width)
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Check if a position lies inside the grid
    pub fn contains(&self, pos: Position) -> bool {
        self.index_of(pos).is_some()
    }

    /// Convert a position to an array index, if in bounds
    pub fn index_of(&self, pos: Position) -> Option<[usize; 2]> {
        let row = usize::try_from(pos.row).ok()?;
        let col = usize::try_from(pos.col).ok()?;
        (row < self.height() && col < self.width()).then_some([row, col])
    }

    /// Cell at a position; `None` if out of bounds
    pub fn cell(&self, pos: Position) -> Option<&Cell<T>> {
        self.index_of(pos).and_then(|index| self.cells.get(index))
    }

    /// Token at a position; `None` if out of bounds or empty
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.cell(pos).and_then(Option::as_ref)
    }

    /// Overwrite a cell, returning the previous content
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position is outside the grid.
    pub fn set(&mut self, pos: Position, value: Cell<T>) -> Result<Cell<T>> {
        let dimensions = self.dimensions();
        let slot = self
            .index_of(pos)
            .and_then(|index| self.cells.get_mut(index))
            .ok_or(BoardError::OutOfBounds {
                position: pos,
                dimensions,
            })?;
        Ok(std::mem::replace(slot, value))
    }

    /// Exchange the contents of two cells
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if either position is outside the grid; the grid
    /// is left unchanged in that case.
    pub fn swap(&mut self, first: Position, second: Position) -> Result<()> {
        let a = self.checked_index(first)?;
        let b = self.checked_index(second)?;
        self.cells.swap(a, b);
        Ok(())
    }

    /// Check if every cell holds a token
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> impl Iterator<Item = &Cell<T>> {
        self.cells.rows().into_iter().nth(row).into_iter().flatten()
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, col: usize) -> impl Iterator<Item = &Cell<T>> {
        self.cells
            .columns()
            .into_iter()
            .nth(col)
            .into_iter()
            .flatten()
    }

    /// Mutable access to the underlying matrix for in-crate algorithms
    pub(crate) const fn cells_mut(&mut self) -> &mut Array2<Cell<T>> {
        &mut self.cells
    }

    fn checked_index(&self, pos: Position) -> Result<[usize; 2]> {
        self.index_of(pos).ok_or_else(|| BoardError::OutOfBounds {
            position: pos,
            dimensions: self.dimensions(),
        })
    }
}

impl<T: Clone> Grid<T> {
    /// Snapshot of all cells as nested rows
    pub fn to_rows(&self) -> Vec<Vec<Cell<T>>> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect()
    }
}

impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                match cell {
                    Some(token) => write!(f, "{token}")?,
                    None => write!(f, "{EMPTY_CELL_GLYPH}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Reject zero or oversized dimensions
///
/// # Errors
///
/// Returns `InvalidDimensions` if either dimension is zero or exceeds
/// `MAX_BOARD_DIMENSION`.
pub const fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 || width > MAX_BOARD_DIMENSION || height > MAX_BOARD_DIMENSION {
        return Err(BoardError::InvalidDimensions { width, height });
    }
    Ok(())
}
