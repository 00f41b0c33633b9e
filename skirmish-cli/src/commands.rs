pub mod play;
pub mod solve;

use std::{fs, path::PathBuf, time::Duration};

use clap::{Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use skirmish_minimax::{
    AlphaBetaSearch, EvaluationWeights, MoveOrdering, ScenarioState, SearchOptions, SearchOutcome,
    Side, Snapshot,
};

use play::Play;
use solve::Solve;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Search a single scenario and print the chosen joint action
    Solve(Solve),
    /// Let both squads play against each other, one search per ply
    Play(Play),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Solve(s) => s.run()?,
            Command::Play(p) => p.run()?,
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SideArg {
    Max,
    Min,
}

impl From<SideArg> for Side {
    fn from(value: SideArg) -> Self {
        match value {
            SideArg::Max => Side::Maximizing,
            SideArg::Min => Side::Minimizing,
        }
    }
}

/// Flags shared by every command that runs a search
#[derive(clap::Args, Debug)]
pub(crate) struct SearchArgs {
    /// JSON file holding the scenario snapshot
    #[clap(short, long, value_parser)]
    scenario: PathBuf,

    /// Number of plies to look ahead
    #[clap(short, long, value_parser, default_value_t = 4)]
    depth: usize,

    /// JSON file overriding the evaluation weights. Missing fields keep their defaults
    #[clap(short, long, value_parser)]
    weights: Option<PathBuf>,

    /// Explore joint actions in generated order instead of sorting them first
    #[clap(long)]
    unordered: bool,

    /// Deepen one ply at a time and stop starting new depths after this many milliseconds
    #[clap(short, long, value_parser)]
    time_budget_ms: Option<u64>,
}

impl SearchArgs {
    pub(crate) fn load_snapshot(&self) -> Result<Snapshot> {
        let raw = fs::read_to_string(&self.scenario)
            .wrap_err_with(|| format!("Could not read {}", self.scenario.display()))?;

        parse_snapshot(&raw)
    }

    pub(crate) fn engine(&self) -> Result<AlphaBetaSearch<EvaluationWeights>> {
        let weights = match &self.weights {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .wrap_err_with(|| format!("Could not read {}", path.display()))?;
                parse_weights(&raw)?
            }
            None => EvaluationWeights::default(),
        };

        let move_ordering = if self.unordered {
            MoveOrdering::Unordered
        } else {
            MoveOrdering::default()
        };

        Ok(AlphaBetaSearch::from_weights(
            weights,
            SearchOptions { move_ordering },
        ))
    }

    /// Search `root` for `side` the way the flags ask for, returning the depth that was reached
    pub(crate) fn search(
        &self,
        engine: &AlphaBetaSearch<EvaluationWeights>,
        side: Side,
        root: &ScenarioState,
    ) -> (usize, SearchOutcome) {
        match self.time_budget_ms {
            Some(ms) => {
                engine.deepened_search(side, root, self.depth, Some(Duration::from_millis(ms)))
            }
            None => (self.depth, engine.search_for(side, root, self.depth)),
        }
    }
}

pub(crate) fn parse_snapshot(raw: &str) -> Result<Snapshot> {
    serde_json::from_str(raw).wrap_err("Scenario is not a valid snapshot")
}

pub(crate) fn parse_weights(raw: &str) -> Result<EvaluationWeights> {
    serde_json::from_str(raw).wrap_err("Weights are not valid evaluation weights")
}
