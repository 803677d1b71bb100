//! Board engine: construction, queries and the move orchestrator
//!
//! A move is validated, swapped, scanned once, settled and announced. All
//! mutation happens on a working copy of the grid that replaces the live grid
//! only when the whole move succeeds, so a rejected or failed move leaves the
//! board exactly as it was. Draws already taken from the token source are not
//! given back.

use std::fmt;

use tracing::{debug, instrument, trace};

use crate::algorithm::collapse::collapse_and_refill;
use crate::algorithm::matching::{Match, ScanDirection, find_matches};
use crate::algorithm::source::TokenSource;
use crate::io::configuration::DEFAULT_MAX_CASCADE_PASSES;
use crate::io::error::{BoardError, Result, invalid_parameter};
use crate::spatial::grid::{Grid, Position, can_move};

/// Behavioural switches for the move orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Undo a swap that produced no match instead of leaving it in place
    pub revert_on_no_match: bool,
    /// Repeat find/clear/refill until the board holds no runs
    pub cascade: bool,
    /// Upper bound on settle passes per move when cascading
    pub max_cascade_passes: usize,
    /// Lines examined for runs
    pub scan: ScanDirection,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            revert_on_no_match: false,
            cascade: false,
            max_cascade_passes: DEFAULT_MAX_CASCADE_PASSES,
            scan: ScanDirection::Rows,
        }
    }
}

/// Notification emitted while a move settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent<T> {
    /// A run was detected and cleared
    Match(Match<T>),
    /// The board finished a settle pass and holds no empty cells
    Refill,
}

impl<T> BoardEvent<T> {
    /// The match carried by this event, if any
    pub const fn as_match(&self) -> Option<&Match<T>> {
        match self {
            Self::Match(found) => Some(found),
            Self::Refill => None,
        }
    }
}

/// Observer invoked with every event, in emission order
pub type BoardListener<T> = Box<dyn FnMut(&BoardEvent<T>)>;

/// Tile-matching board owning its grid and token source
pub struct Board<T, S> {
    grid: Grid<T>,
    source: S,
    config: BoardConfig,
    listeners: Vec<BoardListener<T>>,
}

impl<T, S> Board<T, S>
where
    T: Clone + PartialEq,
    S: TokenSource<T>,
{
    /// Create a board with the default configuration
    ///
    /// # Errors
    ///
    /// See [`Board::with_config`].
    pub fn new(source: S, width: usize, height: usize) -> Result<Self> {
        Self::with_config(source, width, height, BoardConfig::default())
    }

    /// Create a board, drawing one token per cell in row-major order
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` for a zero or oversized dimension, and
    /// `SourceExhausted` if the source cannot fill the grid.
    #[instrument(skip(source))]
    pub fn with_config(
        mut source: S,
        width: usize,
        height: usize,
        config: BoardConfig,
    ) -> Result<Self> {
        let mut drawn = 0;
        let grid = Grid::try_from_fn(width, height, |_| {
            let token = source
                .next_token()
                .ok_or(BoardError::SourceExhausted { drawn })?;
            drawn += 1;
            Ok(Some(token))
        })?;
        debug!(drawn, "board populated");

        Ok(Self {
            grid,
            source,
            config,
            listeners: Vec::new(),
        })
    }

    /// Create a board around an existing, fully populated grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if any cell of the grid is empty.
    pub fn from_grid(grid: Grid<T>, source: S, config: BoardConfig) -> Result<Self> {
        let empty = grid.empty_count();
        if empty > 0 {
            return Err(invalid_parameter(
                "grid",
                &format!("{empty} empty cells"),
                &"every cell must hold a token",
            ));
        }

        Ok(Self {
            grid,
            source,
            config,
            listeners: Vec::new(),
        })
    }

    /// Token at a position; `None` when out of bounds
    pub fn piece(&self, pos: Position) -> Option<&T> {
        self.grid.get(pos)
    }

    /// Check that two positions are adjacent and both on the board
    pub fn can_move(&self, first: Position, second: Position) -> bool {
        can_move(first, second) && self.grid.contains(first) && self.grid.contains(second)
    }

    /// Register an observer for every subsequent event
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&BoardEvent<T>) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Swap two adjacent cells and settle the board
    ///
    /// Returns the events of the move in order: the match events of each
    /// settle pass followed by one refill event. Without cascading there is
    /// exactly one pass, so exactly one refill event. The same sequence is
    /// pushed to every listener after the board has been updated.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` or `InvalidMove` before touching the board, and
    /// `SourceExhausted` if refill fails; the board is unchanged on error.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, first: Position, second: Position) -> Result<Vec<BoardEvent<T>>> {
        self.validate_move(first, second)?;

        let mut grid = self.grid.clone();
        grid.swap(first, second)?;
        trace!("swapped");

        let mut events = Vec::new();
        let matches = find_matches(&grid, self.config.scan);

        if matches.is_empty() && self.config.revert_on_no_match {
            grid.swap(first, second)?;
            debug!("no match, swap reverted");
            events.push(BoardEvent::Refill);
        } else {
            self.settle(&mut grid, matches, &mut events)?;
        }

        self.grid = grid;
        self.notify(&events);
        Ok(events)
    }

    fn settle(
        &mut self,
        grid: &mut Grid<T>,
        mut pending: Vec<Match<T>>,
        events: &mut Vec<BoardEvent<T>>,
    ) -> Result<()> {
        let max_passes = if self.config.cascade {
            self.config.max_cascade_passes.max(1)
        } else {
            1
        };

        for pass in 1..=max_passes {
            let report = collapse_and_refill(grid, &pending, &mut self.source)?;
            debug!(
                pass,
                matches = pending.len(),
                cleared = report.cleared,
                refilled = report.refilled,
                "settle pass"
            );
            events.extend(pending.into_iter().map(BoardEvent::Match));
            events.push(BoardEvent::Refill);

            if pass == max_passes {
                break;
            }
            pending = find_matches(grid, self.config.scan);
            if pending.is_empty() {
                break;
            }
        }

        Ok(())
    }

    fn validate_move(&self, first: Position, second: Position) -> Result<()> {
        for position in [first, second] {
            if !self.grid.contains(position) {
                return Err(BoardError::OutOfBounds {
                    position,
                    dimensions: self.grid.dimensions(),
                });
            }
        }
        if !can_move(first, second) {
            return Err(BoardError::InvalidMove { first, second });
        }
        Ok(())
    }

    fn notify(&mut self, events: &[BoardEvent<T>]) {
        for listener in &mut self.listeners {
            for event in events {
                listener(event);
            }
        }
    }
}

impl<T, S> Board<T, S> {
    /// Number of columns
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Board dimensions as (height, width)
    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    /// Read-only view of the grid
    pub const fn grid(&self) -> &Grid<T> {
        &self.grid
    }

    /// Active configuration
    pub const fn config(&self) -> BoardConfig {
        self.config
    }

    /// Check that no cell is empty
    pub fn is_settled(&self) -> bool {
        self.grid.is_full()
    }
}

impl<T: fmt::Debug, S> fmt::Debug for Board<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("grid", &self.grid)
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
