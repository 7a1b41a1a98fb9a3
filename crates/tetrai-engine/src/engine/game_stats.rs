use std::collections::VecDeque;

use serde::Serialize;

use crate::core::PieceKind;

/// Score values for line clears.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Number of most recent placements averaged by [`GameStats::rolling_lpp`].
pub const LPP_WINDOW: usize = 51;

/// Game statistics: score, lines, placements and piece distribution.
///
/// Besides the totals, the stats keep a rolling *lines per piece* (LPP)
/// value, the mean number of lines cleared over the last [`LPP_WINDOW`]
/// placements, together with the value it had after every placement.
///
/// # Example
///
/// ```
/// use tetrai_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4); // four lines at once
/// stats.complete_piece_drop(0);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// assert!((stats.rolling_lpp() - 2.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
    piece_counts: [usize; PieceKind::LEN],
    #[serde(skip)]
    recent_lines: VecDeque<usize>,
    rolling_lpp: f64,
    lpp_history: Vec<f64>,
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current score (sum of all line clear points).
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
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

    /// Returns a histogram of placements by number of lines they cleared.
    ///
    /// Index `0` counts placements that cleared nothing; index `4` counts
    /// four-line clears.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Number of pieces of each kind drawn so far, indexed by
    /// [`PieceKind::index`]. Includes pieces still waiting in the queue.
    #[must_use]
    pub const fn piece_counts(&self) -> &[usize; PieceKind::LEN] {
        &self.piece_counts
    }

    #[must_use]
    pub const fn piece_count(&self, kind: PieceKind) -> usize {
        self.piece_counts[kind.index()]
    }

    /// Mean lines cleared per placement over the last [`LPP_WINDOW`]
    /// placements; `0.0` before the first placement.
    #[must_use]
    pub const fn rolling_lpp(&self) -> f64 {
        self.rolling_lpp
    }

    /// Rolling LPP after each placement, oldest first.
    #[must_use]
    pub fn lpp_history(&self) -> &[f64] {
        &self.lpp_history
    }

    /// Records that a piece of `kind` was drawn from the generator.
    pub fn record_spawn(&mut self, kind: PieceKind) {
        self.piece_counts[kind.index()] += 1;
    }

    /// Updates statistics after a piece drop.
    ///
    /// # Arguments
    ///
    /// * `cleared_lines` - Number of lines cleared (0-4)
    #[expect(clippy::cast_precision_loss)]
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(counter) = self.line_cleared_counter.get_mut(cleared_lines) {
            *counter += 1;
        }
        self.score += SCORE_TABLE.get(cleared_lines).copied().unwrap_or(0);

        if self.recent_lines.len() == LPP_WINDOW {
            self.recent_lines.pop_front();
        }
        self.recent_lines.push_back(cleared_lines);
        let sum: usize = self.recent_lines.iter().sum();
        self.rolling_lpp = sum as f64 / self.recent_lines.len() as f64;
        self.lpp_history.push(self.rolling_lpp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        let mut stats = GameStats::new();
        for lines in 0..=4 {
            stats.complete_piece_drop(lines);
        }
        assert_eq!(stats.score(), 100 + 300 + 500 + 800);
        assert_eq!(stats.total_cleared_lines(), 10);
        assert_eq!(stats.completed_pieces(), 5);
        assert_eq!(stats.line_cleared_counter(), &[1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_rolling_lpp_window() {
        let mut stats = GameStats::new();
        assert!(stats.rolling_lpp().abs() < f64::EPSILON);

        // 51 single-line placements: LPP 1.0
        for _ in 0..LPP_WINDOW {
            stats.complete_piece_drop(1);
        }
        assert!((stats.rolling_lpp() - 1.0).abs() < 1e-12);

        // Each empty placement pushes one single out of the window
        for i in 1..=LPP_WINDOW {
            stats.complete_piece_drop(0);
            let expected = (LPP_WINDOW - i) as f64 / LPP_WINDOW as f64;
            assert!((stats.rolling_lpp() - expected).abs() < 1e-12);
        }
        assert!(stats.rolling_lpp().abs() < f64::EPSILON);
        assert_eq!(stats.lpp_history().len(), 2 * LPP_WINDOW);
        assert_eq!(stats.total_cleared_lines(), LPP_WINDOW);
    }

    #[test]
    fn test_piece_counts() {
        let mut stats = GameStats::new();
        stats.record_spawn(PieceKind::T);
        stats.record_spawn(PieceKind::T);
        stats.record_spawn(PieceKind::I);
        assert_eq!(stats.piece_count(PieceKind::T), 2);
        assert_eq!(stats.piece_count(PieceKind::I), 1);
        assert_eq!(stats.piece_counts().iter().sum::<usize>(), 3);
    }
}
