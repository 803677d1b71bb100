//! Engine constants and runtime configuration defaults

/// Shortest run of identical tokens reported as a match
pub const MIN_MATCH_LENGTH: usize = 3;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed board dimension
pub const MAX_BOARD_DIMENSION: usize = 10_000;

// Bounds cascade mode so a source that keeps producing runs still terminates
/// Default maximum settle passes per move in cascade mode
pub const DEFAULT_MAX_CASCADE_PASSES: usize = 16;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default board width in columns
pub const DEFAULT_WIDTH: usize = 8;

/// Default board height in rows
pub const DEFAULT_HEIGHT: usize = 8;

/// Default number of distinct token kinds
pub const DEFAULT_TOKEN_KINDS: usize = 5;

/// Default number of moves played per simulated game
pub const DEFAULT_MOVES: usize = 100;

/// Default number of simulated games
pub const DEFAULT_GAMES: usize = 1;

/// Upper bound on token kinds (palette is `A..=Z`)
pub const MAX_TOKEN_KINDS: usize = 26;

// Mixed into the game seed so move picking and refills use independent streams
/// Salt applied to the seed of the move picker
pub const PLAYER_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

// Output settings
/// Prefix of per-game transcript filenames
pub const TRANSCRIPT_PREFIX: &str = "game_";
/// Character rendered for empty cells
pub const EMPTY_CELL_GLYPH: char = '.';
