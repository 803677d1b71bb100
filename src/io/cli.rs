//! Command-line interface for simulating random play on seeded boards

use crate::algorithm::engine::{Board, BoardConfig};
use crate::algorithm::matching::ScanDirection;
use crate::algorithm::player::{GameSummary, RandomPlayer};
use crate::algorithm::source::RandomSource;
use crate::io::configuration::{
    DEFAULT_GAMES, DEFAULT_HEIGHT, DEFAULT_MAX_CASCADE_PASSES, DEFAULT_MOVES, DEFAULT_SEED,
    DEFAULT_TOKEN_KINDS, DEFAULT_WIDTH, MAX_TOKEN_KINDS, PLAYER_SEED_SALT,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::progress::ProgressManager;
use crate::io::transcript::{Transcript, write_transcript};
use crate::spatial::grid::validate_dimensions;
use clap::Parser;
use std::path::PathBuf;
use tracing::{Level, info};

#[derive(Parser, Debug)]
#[command(name = "matchgrid")]
#[command(
    author,
    version,
    about = "Simulate random play on a tile-matching board"
)]
/// Command-line arguments for the board simulator
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Board width in columns
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Board height in rows
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Number of distinct token kinds (tokens are letters from A)
    #[arg(short, long, default_value_t = DEFAULT_TOKEN_KINDS)]
    pub kinds: usize,

    /// Random seed for reproducible games
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Moves played per game
    #[arg(short, long, default_value_t = DEFAULT_MOVES)]
    pub moves: usize,

    /// Number of games to simulate
    #[arg(short, long, default_value_t = DEFAULT_GAMES)]
    pub games: usize,

    /// Undo swaps that produce no match
    #[arg(long)]
    pub revert: bool,

    /// Keep settling until no runs remain after each move
    #[arg(long)]
    pub cascade: bool,

    /// Also match vertical runs
    #[arg(long)]
    pub vertical: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Emit debug logs on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory receiving one transcript per game
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Board configuration selected by the flags
    pub const fn board_config(&self) -> BoardConfig {
        BoardConfig {
            revert_on_no_match: self.revert,
            cascade: self.cascade,
            max_cascade_passes: DEFAULT_MAX_CASCADE_PASSES,
            scan: if self.vertical {
                ScanDirection::RowsAndColumns
            } else {
                ScanDirection::Rows
            },
        }
    }

    /// Token palette: the first `kinds` capital letters
    pub fn palette(&self) -> Vec<char> {
        ('A'..='Z').take(self.kinds).collect()
    }

    /// Log level selected by the flags
    pub const fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        }
    }

    /// Check argument ranges before any game starts
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` for bad board sizes and `InvalidParameter`
    /// for a token kind count outside `2..=26`.
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.height)?;
        if !(2..=MAX_TOKEN_KINDS).contains(&self.kinds) {
            return Err(invalid_parameter(
                "kinds",
                &self.kinds,
                &format!("must be between 2 and {MAX_TOKEN_KINDS}"),
            ));
        }
        Ok(())
    }
}

/// Install the stderr log subscriber at the level chosen by the flags
pub fn init_logging(cli: &Cli) {
    // A subscriber may already be installed, for example by an earlier test
    let _ = tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Runs a batch of simulated games with progress tracking
pub struct GameRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl GameRunner {
    /// Create a new runner with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Play every requested game and return the combined tally
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation, board construction, a move or
    /// a transcript write fails
    pub fn run(&mut self) -> Result<GameSummary> {
        self.cli.validate()?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.cli.games);
        }

        let mut total = GameSummary::default();
        for index in 0..self.cli.games {
            total = total.merged(self.run_game(index)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(total)
    }

    /// Play one game with seeds derived from the base seed and game index
    ///
    /// # Errors
    ///
    /// Returns an error if board construction, a move or the transcript write
    /// fails
    pub fn run_game(&mut self, index: usize) -> Result<GameSummary> {
        let seed = self.cli.seed.wrapping_add(index as u64);
        let config = self.cli.board_config();
        let source = RandomSource::new(self.cli.palette(), seed)?;
        let mut board = Board::with_config(source, self.cli.width, self.cli.height, config)?;
        let mut player = RandomPlayer::new(seed ^ PLAYER_SEED_SALT);

        let mut transcript = self
            .cli
            .output
            .is_some()
            .then(|| Transcript::new(seed, config, board.grid()));
        let mut summary = GameSummary::default();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_game(index, self.cli.moves);
        }

        for move_number in 1..=self.cli.moves {
            let Some((first, second)) = player.pick_move(board.width(), board.height()) else {
                break;
            };
            let events = board.apply_move(first, second)?;
            summary.record(&events, config.revert_on_no_match);

            if let Some(ref mut record) = transcript {
                record.record(first, second, events);
            }
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_moves(index, move_number);
            }
        }

        if let (Some(record), Some(dir)) = (transcript.as_mut(), self.cli.output.as_ref()) {
            record.finish(board.grid());
            let path = write_transcript(record, dir, index + 1)?;
            info!(path = %path.display(), "transcript written");
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_game(index);
        }

        Ok(summary)
    }
}

/// Render a tally as the lines printed after a run
pub fn summary_lines(summary: &GameSummary) -> Vec<String> {
    let match_rate = if summary.moves == 0 {
        0.0
    } else {
        summary.matching_moves as f64 / summary.moves as f64 * 100.0
    };

    vec![
        format!("moves:          {}", summary.moves),
        format!(
            "matching moves: {} ({match_rate:.1}%)",
            summary.matching_moves
        ),
        format!("matches:        {}", summary.matches),
        format!("tokens matched: {}", summary.tokens_matched),
        format!("settle passes:  {}", summary.settle_passes),
        format!("reverted swaps: {}", summary.reverted),
    ]
}

/// Print a tally to stdout
// Allow print for the final report of the run
#[allow(clippy::print_stdout)]
pub fn print_summary(summary: &GameSummary) {
    for line in summary_lines(summary) {
        println!("{line}");
    }
}
