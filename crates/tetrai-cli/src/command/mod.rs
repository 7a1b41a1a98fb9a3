use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tetrai_evaluator::config::{AgentConfig, Difficulty, LookaheadDepth};

use self::{auto_play::AutoPlayArg, suggest::SuggestArg};
use crate::util;

mod auto_play;
mod suggest;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Silence all log output
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play games headless with the agent and report the results as JSON
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Print the agent's move for a board read from a text file
    Suggest(#[clap(flatten)] SuggestArg),
}

/// Agent settings shared by every mode.
///
/// A `--config` file is loaded first; flags given on the command line
/// override it.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AgentArg {
    /// Agent settings file (JSON)
    #[clap(long)]
    config: Option<PathBuf>,
    /// Game speed and stack-height cap (easy, medium, hard, insane)
    #[clap(long)]
    difficulty: Option<Difficulty>,
    /// Number of upcoming pieces to search (0..=2)
    #[clap(long)]
    lookahead: Option<LookaheadDepth>,
    /// Double the reward for four-line clears
    #[clap(long)]
    tetris_priority: bool,
    /// Weigh holes five times as heavily
    #[clap(long)]
    hole_aversion: bool,
    /// Pick moves at random instead of searching
    #[clap(long)]
    disable_agent: bool,
    /// Seed of the random mover
    #[clap(long)]
    random_seed: Option<u64>,
}

impl AgentArg {
    pub(crate) fn to_config(&self) -> anyhow::Result<AgentConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("agent config", path)?,
            None => AgentConfig::default(),
        };
        if let Some(difficulty) = self.difficulty {
            config.search.difficulty = difficulty;
        }
        if let Some(lookahead) = self.lookahead {
            config.search.lookahead = lookahead;
        }
        config.search.tetris_priority |= self.tetris_priority;
        config.search.hole_aversion |= self.hole_aversion;
        if self.disable_agent {
            config.enabled = false;
        }
        if self.random_seed.is_some() {
            config.random_seed = self.random_seed;
        }
        tracing::debug!(?config, "agent configured");
        Ok(config)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    util::init_tracing(args.verbose, args.quiet);
    match args.mode {
        Mode::AutoPlay(arg) => auto_play::run(&arg)?,
        Mode::Suggest(arg) => suggest::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = CommandArgs::try_parse_from([
            "tetrai",
            "-vv",
            "auto-play",
            "--difficulty",
            "hard",
            "--lookahead",
            "2",
            "--hole-aversion",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        let Mode::AutoPlay(arg) = args.mode else {
            panic!("expected auto-play");
        };
        let config = arg.agent.to_config().unwrap();
        assert!(config.enabled);
        assert_eq!(config.search.difficulty, Difficulty::Hard);
        assert_eq!(config.search.lookahead, LookaheadDepth::HYPER);
        assert!(config.search.hole_aversion);
        assert!(!config.search.tetris_priority);
    }

    #[test]
    fn test_invalid_lookahead_is_rejected() {
        let result = CommandArgs::try_parse_from(["tetrai", "auto-play", "--lookahead", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_disable_agent() {
        let args = CommandArgs::try_parse_from([
            "tetrai",
            "-q",
            "auto-play",
            "--disable-agent",
            "--random-seed",
            "4",
        ])
        .unwrap();
        assert!(args.quiet);
        let Mode::AutoPlay(arg) = args.mode else {
            panic!("expected auto-play");
        };
        let config = arg.agent.to_config().unwrap();
        assert!(!config.enabled);
        assert_eq!(config.random_seed, Some(4));
    }
}
