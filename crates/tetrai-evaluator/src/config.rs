//! Agent configuration.
//!
//! Every value here is immutable once built and passed explicitly into the
//! search; nothing is read from global state.

use std::{str::FromStr, time::Duration};

use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{
    heuristic::EvaluationConfig, lookahead::LookaheadSearch, random_mover::RandomMover,
    selector::MoveSelector,
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("lookahead depth {depth} is out of range (0..=2)")]
    LookaheadOutOfRange { depth: u8 },
    #[display("invalid lookahead depth {input:?}")]
    InvalidLookahead { input: String },
}

/// Game speed and the matching stack-height cap.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Insane,
}

impl Difficulty {
    /// Time between two placements.
    #[must_use]
    pub const fn tick_interval(self) -> Duration {
        Duration::from_millis(match self {
            Difficulty::Easy => 800,
            Difficulty::Medium => 500,
            Difficulty::Hard => 250,
            Difficulty::Insane => 100,
        })
    }

    /// Column height above which the evaluator applies its height penalty.
    #[must_use]
    pub const fn max_height(self) -> u8 {
        match self {
            Difficulty::Easy => 20,
            Difficulty::Medium => 18,
            Difficulty::Hard => 16,
            Difficulty::Insane => 14,
        }
    }
}

/// Number of upcoming pieces the search looks at, in `0..=2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LookaheadDepth(u8);

impl LookaheadDepth {
    pub const MAX: u8 = 2;
    /// Only the current piece.
    pub const NONE: Self = Self(0);
    /// Current piece plus the next one.
    pub const STANDARD: Self = Self(1);
    /// Current piece plus the next two.
    pub const HYPER: Self = Self(2);

    pub fn new(depth: u8) -> Result<Self, ConfigError> {
        if depth > Self::MAX {
            return Err(ConfigError::LookaheadOutOfRange { depth });
        }
        Ok(Self(depth))
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

impl Default for LookaheadDepth {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl TryFrom<u8> for LookaheadDepth {
    type Error = ConfigError;

    fn try_from(depth: u8) -> Result<Self, Self::Error> {
        Self::new(depth)
    }
}

impl From<LookaheadDepth> for u8 {
    fn from(depth: LookaheadDepth) -> Self {
        depth.0
    }
}

impl FromStr for LookaheadDepth {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let depth = s
            .trim()
            .parse::<u8>()
            .map_err(|_| ConfigError::InvalidLookahead {
                input: s.to_owned(),
            })?;
        Self::new(depth)
    }
}

/// Settings of one search call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub difficulty: Difficulty,
    pub lookahead: LookaheadDepth,
    pub tetris_priority: bool,
    pub hole_aversion: bool,
}

impl SearchConfig {
    #[must_use]
    pub const fn evaluation(&self) -> EvaluationConfig {
        EvaluationConfig {
            max_height_allowed: self.difficulty.max_height(),
            tetris_priority: self.tetris_priority,
            hole_aversion: self.hole_aversion,
        }
    }
}

/// Which strategy picks moves, and how.
///
/// # Example
///
/// ```
/// use tetrai_evaluator::config::{AgentConfig, Difficulty};
///
/// let config: AgentConfig = serde_json::from_str(
///     r#"{ "search": { "difficulty": "hard", "lookahead": 2 } }"#,
/// )
/// .unwrap();
/// assert!(config.enabled);
/// assert_eq!(config.search.difficulty, Difficulty::Hard);
/// assert_eq!(config.search.lookahead.get(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// When `false`, moves are picked at random instead of searched.
    pub enabled: bool,
    pub search: SearchConfig,
    /// Seed of the random mover; drawn from the thread RNG when absent.
    pub random_seed: Option<u64>,
}

/// Tick interval used while the agent is disabled.
pub const RANDOM_TICK_INTERVAL: Duration = Duration::from_millis(100);

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            search: SearchConfig::default(),
            random_seed: None,
        }
    }
}

impl AgentConfig {
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        if self.enabled {
            self.search.difficulty.tick_interval()
        } else {
            RANDOM_TICK_INTERVAL
        }
    }

    #[must_use]
    pub fn build_selector(&self) -> Box<dyn MoveSelector> {
        if self.enabled {
            return Box::new(LookaheadSearch::from_config(&self.search));
        }
        match self.random_seed {
            Some(seed) => Box::new(RandomMover::new(Pcg32::seed_from_u64(seed))),
            None => Box::new(RandomMover::new(Pcg32::from_rng(&mut rand::rng()))),
        }
    }
}
