use color_eyre::eyre::Result;
use serde::Serialize;
use skirmish_minimax::{
    build_root_state, AlphaBetaSearch, EvaluationWeights, JointAction, ScenarioState, Side,
    Snapshot,
};
use tracing::{info, info_span, warn};

use super::SearchArgs;

/// Let both squads search for their moves in turn until the fight is decided
#[derive(clap::Args, Debug)]
pub struct Play {
    #[clap(flatten)]
    search: SearchArgs,

    /// Stop after this many plies even if both squads are still standing
    #[clap(short, long, value_parser, default_value_t = 40)]
    max_plies: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Turn {
    pub ply: u32,
    pub side: Side,
    pub joint_action: JointAction,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct Replay {
    pub turns: Vec<Turn>,
    pub winner: Option<Side>,
    pub final_state: Snapshot,
}

pub(crate) fn play_out(
    search: &SearchArgs,
    engine: &AlphaBetaSearch<EvaluationWeights>,
    root: ScenarioState,
    max_plies: u32,
) -> Result<Replay> {
    let mut state = root;
    let mut turns = vec![];

    while !state.is_terminal() && (turns.len() as u32) < max_plies {
        let side = Side::for_ply(state.ply());
        let span = info_span!("ply", ply = state.ply(), side = %side);
        let _guard = span.enter();

        let (depth, outcome) = search.search(engine, side, &state);

        if !outcome.has_move() {
            warn!("side to move has nothing to do, ending the game");
            break;
        }

        info!(
            depth,
            value = outcome.value,
            action = %outcome.best.joint_action,
            "chose joint action"
        );

        let next = state.apply(side, &outcome.best.joint_action)?;
        turns.push(Turn {
            ply: state.ply(),
            side,
            joint_action: outcome.best.joint_action,
            value: outcome.value,
        });
        state = next;
    }

    let winner = winner(&state);
    info!(plies = turns.len(), winner = ?winner, "game over");

    Ok(Replay {
        turns,
        winner,
        final_state: state.to_snapshot(),
    })
}

fn winner(state: &ScenarioState) -> Option<Side> {
    let maximizers = state.units_of(Side::Maximizing).count();
    let minimizers = state.units_of(Side::Minimizing).count();

    match (maximizers, minimizers) {
        (0, 0) => None,
        (_, 0) => Some(Side::Maximizing),
        (0, _) => Some(Side::Minimizing),
        _ => None,
    }
}

impl Play {
    pub(crate) fn run(self) -> Result<()> {
        let root = build_root_state(self.search.load_snapshot()?)?;
        let engine = self.search.engine()?;

        let replay = play_out(&self.search, &engine, root, self.max_plies)?;

        println!("{}", serde_json::to_string_pretty(&replay)?);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use skirmish_minimax::{Position, Role, Unit, UnitId};

    use super::*;
    use crate::commands::parse_snapshot;

    #[derive(Parser, Debug)]
    struct Harness {
        #[clap(flatten)]
        play: Play,
    }

    fn harness(args: &[&str]) -> Play {
        Harness::parse_from(std::iter::once("skirmish").chain(args.iter().copied())).play
    }

    #[test]
    fn test_sides_alternate() {
        let play = harness(&["--scenario", "unused.json", "--depth", "2"]);
        let fixture = include_str!("../../../skirmish-minimax/fixtures/two_on_two.json");
        let root = build_root_state(parse_snapshot(fixture).unwrap()).unwrap();
        let engine = play.search.engine().unwrap();

        let replay = play_out(&play.search, &engine, root, 4).unwrap();

        assert!(replay.turns.len() <= 4);
        for (i, turn) in replay.turns.iter().enumerate() {
            assert_eq!(turn.ply, i as u32);
            assert_eq!(turn.side, Side::for_ply(i as u32));
            assert!(!turn.joint_action.is_empty());
        }
        assert_eq!(replay.final_state.ply, replay.turns.len() as u32);
    }

    #[test]
    fn test_melee_finishes_an_adjacent_archer() {
        let play = harness(&["--scenario", "unused.json", "--depth", "1"]);
        let root = build_root_state(Snapshot {
            map_width: 3,
            map_height: 0,
            obstacles: vec![],
            units: vec![
                Unit {
                    id: UnitId(1),
                    role: Role::Melee,
                    position: Position::new(0, 0),
                    health: 10,
                    attack_power: 5,
                },
                Unit {
                    id: UnitId(2),
                    role: Role::Ranged,
                    position: Position::new(1, 0),
                    health: 5,
                    attack_power: 1,
                },
            ],
            ply: 0,
        })
        .unwrap();
        let engine = play.search.engine().unwrap();

        let replay = play_out(&play.search, &engine, root, 10).unwrap();

        assert_eq!(replay.turns.len(), 1);
        assert_eq!(replay.winner, Some(Side::Maximizing));
        assert_eq!(replay.final_state.units.len(), 1);
    }

    #[test]
    fn test_zero_plies_keeps_the_root() {
        let play = harness(&["--scenario", "unused.json", "--max-plies", "0"]);
        let fixture = include_str!("../../../skirmish-minimax/fixtures/melee_vs_ranged.json");
        let root = build_root_state(parse_snapshot(fixture).unwrap()).unwrap();
        let engine = play.search.engine().unwrap();

        let replay = play_out(&play.search, &engine, root.clone(), play.max_plies).unwrap();

        assert!(replay.turns.is_empty());
        assert_eq!(replay.winner, None);
        assert_eq!(replay.final_state, root.to_snapshot());
    }
}
