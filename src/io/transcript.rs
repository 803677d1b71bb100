//! Plain-text game transcripts
//!
//! Layout: a header line, the initial grid, one block per move listing its
//! events in emission order, then the final grid.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::algorithm::engine::{BoardConfig, BoardEvent};
use crate::io::configuration::TRANSCRIPT_PREFIX;
use crate::io::error::{Result, file_system_error};
use crate::spatial::grid::{Grid, Position};

/// One applied move and the events it produced
#[derive(Debug, Clone)]
pub struct MoveRecord<T> {
    /// First swapped position
    pub first: Position,
    /// Second swapped position
    pub second: Position,
    /// Events returned by the board
    pub events: Vec<BoardEvent<T>>,
}

/// Recorded history of one simulated game
#[derive(Debug, Clone)]
pub struct Transcript<T> {
    seed: u64,
    config: BoardConfig,
    initial: Grid<T>,
    moves: Vec<MoveRecord<T>>,
    final_grid: Option<Grid<T>>,
}

impl<T: Clone> Transcript<T> {
    /// Start a transcript from the freshly constructed grid
    pub fn new(seed: u64, config: BoardConfig, initial: &Grid<T>) -> Self {
        Self {
            seed,
            config,
            initial: initial.clone(),
            moves: Vec::new(),
            final_grid: None,
        }
    }

    /// Append a move
    pub fn record(&mut self, first: Position, second: Position, events: Vec<BoardEvent<T>>) {
        self.moves.push(MoveRecord {
            first,
            second,
            events,
        });
    }

    /// Close the transcript with the grid after the last move
    pub fn finish(&mut self, grid: &Grid<T>) {
        self.final_grid = Some(grid.clone());
    }

    /// Recorded moves
    pub fn moves(&self) -> &[MoveRecord<T>] {
        &self.moves
    }
}

impl<T: fmt::Display> fmt::Display for Transcript<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "seed {} size {}x{} scan {:?} revert {} cascade {}",
            self.seed,
            self.initial.width(),
            self.initial.height(),
            self.config.scan,
            self.config.revert_on_no_match,
            self.config.cascade
        )?;
        writeln!(f, "initial:")?;
        write!(f, "{}", self.initial)?;

        for (index, record) in self.moves.iter().enumerate() {
            writeln!(
                f,
                "move {}: {} <-> {}",
                index + 1,
                record.first,
                record.second
            )?;
            for event in &record.events {
                write_event(f, event)?;
            }
        }

        if let Some(grid) = &self.final_grid {
            writeln!(f, "final:")?;
            write!(f, "{grid}")?;
        }
        Ok(())
    }
}

fn write_event<T: fmt::Display>(f: &mut fmt::Formatter<'_>, event: &BoardEvent<T>) -> fmt::Result {
    match event {
        BoardEvent::Match(found) => {
            let positions: Vec<String> = found.positions.iter().map(ToString::to_string).collect();
            writeln!(f, "  match {} at [{}]", found.token, positions.join(", "))
        }
        BoardEvent::Refill => writeln!(f, "  refill"),
    }
}

/// Path of the transcript for a given game inside `dir`
pub fn transcript_path(dir: &Path, game: usize) -> PathBuf {
    dir.join(format!("{TRANSCRIPT_PREFIX}{game}.txt"))
}

/// Write a transcript to `<dir>/game_<game>.txt`, creating `dir` if needed
///
/// # Errors
///
/// Returns `FileSystem` if the directory cannot be created or the file
/// cannot be written.
pub fn write_transcript<T: fmt::Display>(
    transcript: &Transcript<T>,
    dir: &Path,
    game: usize,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .map_err(|source| file_system_error(dir, "create directory", source))?;

    let path = transcript_path(dir, game);
    std::fs::write(&path, transcript.to_string())
        .map_err(|source| file_system_error(&path, "write transcript", source))?;
    Ok(path)
}
