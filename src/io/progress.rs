//! Multi-game progress tracking with automatic batching for large runs

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Coordinates progress display for a batch of simulated games
///
/// Shows one bar per game for small batches and adds a batch bar once the
/// game count exceeds the individual bar limit; the per-game bars then show a
/// rolling window of the most recent games.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    game_bars: Vec<ProgressBar>,
    /// Stores (`label`, `current_move`, `max_moves`) for rolling window display
    game_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static MOVE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!("{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{msg}}");
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Games: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            game_bars: Vec::new(),
            game_states: Vec::new(),
        }
    }

    /// Create bars for the given number of games
    pub fn initialize(&mut self, game_count: usize) {
        if game_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(game_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..game_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let pb = ProgressBar::new(0);
            pb.set_style(MOVE_STYLE.clone());
            self.game_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Number of per-game bars in use
    pub const fn visible_bars(&self) -> usize {
        self.game_bars.len()
    }

    /// Whether the batch bar is shown
    pub const fn is_batched(&self) -> bool {
        self.batch_bar.is_some()
    }

    /// Configure progress for a new game
    pub fn start_game(&mut self, index: usize, moves: usize) {
        if index >= self.game_states.len() {
            self.game_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.game_states.get_mut(index) {
            *state = (format!("game {}", index + 1), 0, moves);
        }
        self.update_bars();
    }

    /// Report the number of moves applied so far
    pub fn update_moves(&mut self, index: usize, moves: usize) {
        if let Some(state) = self.game_states.get_mut(index) {
            state.1 = moves;
        }
        self.update_bars();
    }

    /// Mark a game as completed
    pub fn complete_game(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.game_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
            state.1 = state.2;
        }
        self.update_bars();
    }

    /// Progress recorded for a game as (`current_move`, `max_moves`)
    pub fn game_progress(&self, index: usize) -> Option<(usize, usize)> {
        self.game_states
            .get(index)
            .map(|(_, current, max)| (*current, *max))
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All games played");
        }
        let _ = self.multi_progress.clear();
    }

    // Shows the most recent games in the available bars
    fn update_bars(&self) {
        let active: Vec<&(String, usize, usize)> = self
            .game_states
            .iter()
            .filter(|(label, _, _)| !label.is_empty())
            .collect();

        let start = active.len().saturating_sub(self.game_bars.len());
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar_idx, (label, current, max)) in visible.iter().enumerate() {
            if let Some(bar) = self.game_bars.get(bar_idx) {
                bar.set_length(*max as u64);
                bar.set_position(*current as u64);
                let max_width = max.to_string().len();
                bar.set_message(format!("{current:>max_width$}/{max}"));
                bar.set_prefix(label.clone());
            }
        }

        for bar in self.game_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
