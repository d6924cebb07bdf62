use serde::{Deserialize, Serialize};

/// Number of cleared lines needed to advance one level.
pub const LINES_PER_LEVEL: usize = 10;

/// Returns the points awarded for clearing `cleared_lines` lines at once.
///
/// `100 × 2^(n−1)`: 100, 200, 400, 800 for one to four lines, and 0 when
/// nothing was cleared. Saturates instead of overflowing on absurdly tall grids.
///
/// # Examples
///
/// ```
/// use quadris_engine::line_clear_points;
///
/// assert_eq!(line_clear_points(0), 0);
/// assert_eq!(line_clear_points(1), 100);
/// assert_eq!(line_clear_points(4), 800);
/// ```
#[must_use]
pub fn line_clear_points(cleared_lines: usize) -> usize {
    if cleared_lines == 0 {
        return 0;
    }
    u32::try_from(cleared_lines - 1)
        .ok()
        .and_then(|exp| 1_usize.checked_shl(exp))
        .and_then(|factor| factor.checked_mul(100))
        .unwrap_or(usize::MAX)
}

/// Game statistics tracking score, lines cleared, and piece count.
///
/// Tracks various metrics during a game session:
///
/// - **Score**: Points earned from line clears and soft drops
/// - **Level**: Derived from total lines cleared (1 level per 10 lines, starting at 1)
/// - **Completed pieces**: Total number of pieces locked
/// - **Line clear distribution**: Count of single, double, triple and quad line clears
///
/// # Example
///
/// ```
/// use quadris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_lock();
/// stats.record_line_clear(4);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[3], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 4],
    soft_drop_points: usize,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 4],
            soft_drop_points: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level: `1 + total_cleared_lines / 10`.
    #[must_use]
    pub const fn level(&self) -> usize {
        1 + self.total_cleared_lines / LINES_PER_LEVEL
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of line clears by count.
    ///
    /// Array indices represent:
    /// - `[0]`: Number of singles (1 line)
    /// - `[1]`: Number of doubles (2 lines)
    /// - `[2]`: Number of triples (3 lines)
    /// - `[3]`: Number of quads (4 or more lines)
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 4] {
        &self.line_cleared_counter
    }

    /// Returns the part of the score earned by soft drops.
    #[must_use]
    pub const fn soft_drop_points(&self) -> usize {
        self.soft_drop_points
    }

    /// Counts one more locked piece.
    pub const fn record_lock(&mut self) {
        self.completed_pieces += 1;
    }

    /// Adds `cleared_lines` to the line total and scores them.
    ///
    /// Does nothing when `cleared_lines` is zero.
    pub fn record_line_clear(&mut self, cleared_lines: usize) {
        if cleared_lines == 0 {
            return;
        }
        self.total_cleared_lines += cleared_lines;
        self.line_cleared_counter[cleared_lines.min(4) - 1] += 1;
        self.score = self.score.saturating_add(line_clear_points(cleared_lines));
    }

    /// Awards one point per cell of soft drop.
    pub fn add_soft_drop(&mut self, cells: usize) {
        self.soft_drop_points += cells;
        self.score = self.score.saturating_add(cells);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_points() {
        assert_eq!(line_clear_points(0), 0);
        assert_eq!(line_clear_points(1), 100);
        assert_eq!(line_clear_points(2), 200);
        assert_eq!(line_clear_points(3), 400);
        assert_eq!(line_clear_points(4), 800);
        assert_eq!(line_clear_points(5), 1600);
        assert_eq!(line_clear_points(1000), usize::MAX);
    }

    #[test]
    fn test_new_stats_start_at_level_one() {
        let stats = GameStats::new();
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.total_cleared_lines(), 0);
        assert_eq!(stats.line_cleared_counter(), &[0; 4]);
    }

    #[test]
    fn test_level_follows_lines() {
        let mut stats = GameStats::new();
        for _ in 0..9 {
            stats.record_line_clear(1);
        }
        assert_eq!(stats.level(), 1);
        stats.record_line_clear(1);
        assert_eq!(stats.level(), 2);
        stats.record_line_clear(4);
        stats.record_line_clear(4);
        stats.record_line_clear(2);
        assert_eq!(stats.total_cleared_lines(), 20);
        assert_eq!(stats.level(), 3);
    }

    #[test]
    fn test_zero_line_clear_is_ignored() {
        let mut stats = GameStats::new();
        stats.record_line_clear(0);
        assert_eq!(stats, GameStats::new());
    }

    #[test]
    fn test_histogram_and_score() {
        let mut stats = GameStats::new();
        stats.record_line_clear(1);
        stats.record_line_clear(2);
        stats.record_line_clear(2);
        stats.record_line_clear(4);
        stats.add_soft_drop(3);
        assert_eq!(stats.line_cleared_counter(), &[1, 2, 0, 1]);
        assert_eq!(stats.score(), 100 + 200 + 200 + 800 + 3);
        assert_eq!(stats.soft_drop_points(), 3);
    }

    #[test]
    fn test_record_lock() {
        let mut stats = GameStats::new();
        stats.record_lock();
        stats.record_lock();
        assert_eq!(stats.completed_pieces(), 2);
        assert_eq!(stats.score(), 0);
    }
}
