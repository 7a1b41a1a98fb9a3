use std::path::PathBuf;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;
use tetrai_engine::{GameSession, GameStats, PieceSeed};
use tetrai_evaluator::{MoveSelector, config::AgentConfig, session};

use super::AgentArg;
use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    #[clap(flatten)]
    pub(super) agent: AgentArg,
    /// Stop each game after this many moves
    #[clap(long)]
    turn_limit: Option<usize>,
    /// Number of games to play
    #[clap(long, default_value_t = 1)]
    games: usize,
    /// Piece seed of the first game (32 hex digits); later game seeds are
    /// derived from it
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Output file path for the report (defaults to stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct AutoPlayReport {
    agent: AgentConfig,
    games: Vec<GameReport>,
}

/// One finished game. The statistics are flattened into the report,
/// including the rolling LPP after every placement.
#[derive(Debug, Serialize)]
struct GameReport {
    seed: PieceSeed,
    turns: usize,
    game_over: bool,
    elapsed_secs: f64,
    #[serde(flatten)]
    stats: GameStats,
}

impl GameReport {
    fn from_session(session: &GameSession, turns: usize) -> Self {
        Self {
            seed: session.seed(),
            turns,
            game_over: session.session_state().is_game_over(),
            elapsed_secs: session.elapsed().as_secs_f64(),
            stats: session.stats().clone(),
        }
    }
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let agent = arg.agent.to_config()?;
    let mut selector = agent.build_selector();
    let games = play_games(&agent, selector.as_mut(), arg.seed, arg.games, arg.turn_limit);
    Output::save_json(&AutoPlayReport { agent, games }, arg.output.as_deref())
}

fn play_games(
    agent: &AgentConfig,
    selector: &mut dyn MoveSelector,
    first_seed: Option<PieceSeed>,
    games: usize,
    turn_limit: Option<usize>,
) -> Vec<GameReport> {
    let mut seeds = match first_seed {
        Some(seed) => Pcg32::from_seed(seed.to_bytes()),
        None => Pcg32::from_rng(&mut rand::rng()),
    };
    (0..games)
        .map(|i| {
            let seed = match first_seed {
                Some(seed) if i == 0 => seed,
                _ => seeds.random(),
            };
            tracing::info!(game = i + 1, games, %seed, "starting game");
            let mut game = GameSession::with_seed(seed, agent.tick_interval());
            let turns = session::play(&mut game, &mut *selector, turn_limit);
            GameReport::from_session(&game, turns)
        })
        .collect()
}
