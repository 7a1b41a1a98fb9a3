//! Static board scoring.
//!
//! [`HeuristicEvaluator`] scores a board as a weighted sum of four structural
//! features (see [`BoardAnalysis`]) with two optional adjustments and a
//! quadratic penalty for stacks above the allowed height:
//!
//! ```text
//! lines  = w_lines * completed_lines^2        (doubled for 4 lines with tetris priority)
//! holes  = w_holes * holes                    (x5 with hole aversion)
//! height = 10 * (max_height - allowed)^2      (only when max_height > allowed)
//!
//! score = w_height * aggregate_height + lines + holes + w_bump * bumpiness - height
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tetrai_engine::{BOARD_HEIGHT, Board};

use crate::board_analysis::BoardAnalysis;

/// Scores a board; higher is better.
pub trait BoardEvaluator: fmt::Debug + Send + Sync {
    fn evaluate_board(&self, analysis: &BoardAnalysis<'_>, config: &EvaluationConfig) -> f64;
}

/// Per-call switches of the evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Column height above which the quadratic penalty applies.
    pub max_height_allowed: u8,
    /// Double the completed-lines term when exactly 4 lines are completed.
    pub tetris_priority: bool,
    /// Multiply the holes weight by 5.
    pub hole_aversion: bool,
}

impl Default for EvaluationConfig {
    #[expect(clippy::cast_possible_truncation)]
    fn default() -> Self {
        Self {
            max_height_allowed: BOARD_HEIGHT as u8,
            tetris_priority: false,
            hole_aversion: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    pub aggregate_height: f64,
    pub completed_lines: f64,
    pub holes: f64,
    pub bumpiness: f64,
}

impl HeuristicWeights {
    pub const DEFAULT: Self = Self {
        aggregate_height: -0.510_066,
        completed_lines: 0.760_666,
        holes: -0.356_63,
        bumpiness: -0.184_483,
    };
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const HOLE_AVERSION_FACTOR: f64 = 5.0;
const HEIGHT_PENALTY_FACTOR: f64 = 10.0;
const TETRIS_LINES: u32 = 4;

/// The fixed-weight linear heuristic.
///
/// # Example
///
/// ```
/// use tetrai_engine::Board;
/// use tetrai_evaluator::heuristic::{EvaluationConfig, HeuristicEvaluator};
///
/// let evaluator = HeuristicEvaluator::default();
/// assert_eq!(evaluator.evaluate(&Board::EMPTY, &EvaluationConfig::default()), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeuristicEvaluator {
    weights: HeuristicWeights,
}

impl HeuristicEvaluator {
    #[must_use]
    pub const fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    /// Shorthand for evaluating a board without keeping its analysis.
    #[must_use]
    pub fn evaluate(&self, board: &Board, config: &EvaluationConfig) -> f64 {
        self.evaluate_board(&BoardAnalysis::from_board(board), config)
    }
}

impl BoardEvaluator for HeuristicEvaluator {
    fn evaluate_board(&self, analysis: &BoardAnalysis<'_>, config: &EvaluationConfig) -> f64 {
        let w = &self.weights;
        let completed_lines = analysis.completed_lines();

        // Two roundings, left to right: (w * lines) * lines.
        let lines = f64::from(completed_lines);
        let mut lines_score = w.completed_lines * lines * lines;
        if config.tetris_priority && completed_lines == TETRIS_LINES {
            lines_score *= 2.0;
        }
        let hole_weight = if config.hole_aversion {
            w.holes * HOLE_AVERSION_FACTOR
        } else {
            w.holes
        };
        let max_height = analysis.max_height();
        let height_penalty = if max_height > config.max_height_allowed {
            f64::from(max_height - config.max_height_allowed).powi(2) * HEIGHT_PENALTY_FACTOR
        } else {
            0.0
        };

        w.aggregate_height * f64::from(analysis.aggregate_height())
            + lines_score
            + hole_weight * f64::from(analysis.holes())
            + w.bumpiness * f64::from(analysis.bumpiness())
            - height_penalty
    }
}
