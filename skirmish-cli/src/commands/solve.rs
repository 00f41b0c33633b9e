use color_eyre::eyre::Result;
use serde::Serialize;
use skirmish_minimax::{
    build_root_state, AlphaBetaSearch, EvaluationWeights, JointAction, ScenarioState, SearchStats,
    Side, Snapshot,
};
use tracing::info;

use super::{SearchArgs, SideArg};

/// Pick the joint action for one side of a scenario
#[derive(clap::Args, Debug)]
pub struct Solve {
    #[clap(flatten)]
    search: SearchArgs,

    /// Side to pick a joint action for. Defaults to whoever moves on the scenario's ply
    #[clap(long, value_enum)]
    side: Option<SideArg>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Solution {
    pub side: Side,
    pub depth: usize,
    pub joint_action: JointAction,
    pub value: f64,
    pub stats: SearchStats,
    pub resulting_state: Snapshot,
}

pub(crate) fn solve(
    search: &SearchArgs,
    engine: &AlphaBetaSearch<EvaluationWeights>,
    side: Option<Side>,
    root: &ScenarioState,
) -> Solution {
    let side = side.unwrap_or_else(|| Side::for_ply(root.ply()));
    let (depth, outcome) = search.search(engine, side, root);

    info!(
        %side,
        depth,
        value = outcome.value,
        action = %outcome.best.joint_action,
        expanded = outcome.stats.expanded,
        prunes = outcome.stats.prunes,
        "search finished"
    );

    Solution {
        side,
        depth,
        joint_action: outcome.best.joint_action,
        value: outcome.value,
        stats: outcome.stats,
        resulting_state: outcome.best.resulting_state.to_snapshot(),
    }
}

impl Solve {
    pub(crate) fn run(self) -> Result<()> {
        let root = build_root_state(self.search.load_snapshot()?)?;
        let engine = self.search.engine()?;

        let solution = solve(&self.search, &engine, self.side.map(Side::from), &root);

        println!("{}", serde_json::to_string_pretty(&solution)?);

        Ok(())
    }
}
