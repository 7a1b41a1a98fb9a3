use std::path::{Path, PathBuf};

use anyhow::Context as _;
use tetrai_engine::{Board, PieceKind};
use tetrai_evaluator::{Move, config::AgentConfig};

use super::AgentArg;
use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SuggestArg {
    #[clap(flatten)]
    pub(super) agent: AgentArg,
    /// Board text file: up to 20 rows of 10 cells, `.` empty and `1`-`7`
    /// or `#` filled, bottom row last
    board: PathBuf,
    /// Current piece (I, O, T, L, J, S or Z)
    piece: PieceKind,
    /// Up to two upcoming pieces
    #[clap(num_args = 0..=2)]
    next: Vec<PieceKind>,
    /// Output file path (defaults to stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SuggestArg) -> anyhow::Result<()> {
    let agent = arg.agent.to_config()?;
    let board = read_board(&arg.board)?;
    let mv = suggest(&agent, &board, arg.piece, &arg.next);
    if mv.is_none() {
        tracing::warn!(piece = ?arg.piece, "no legal placement");
    }
    Output::save_json(&mv, arg.output.as_deref())
}

fn read_board(path: &Path) -> anyhow::Result<Board> {
    util::read_text_file("board", path)?
        .parse()
        .with_context(|| format!("Failed to parse board file: {}", path.display()))
}

fn suggest(
    agent: &AgentConfig,
    board: &Board,
    piece: PieceKind,
    next: &[PieceKind],
) -> Option<Move> {
    agent.build_selector().select_move(board, piece, next)
}
