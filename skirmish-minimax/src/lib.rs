#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements a depth limited minimax search with alpha-beta pruning for small
//! tactical skirmishes: two squads of units on a grid with static obstacles, where every unit of
//! the side to move acts at the same time.
//!
//! The state layer ([ScenarioState]) knows the combat rules. It enumerates what each unit can
//! do, combines those into joint actions, and applies them to build successor states. The search
//! layer ([AlphaBetaSearch]) only asks the state for its children and scores leaves with a
//! [Scorable].

mod action;
pub use action::{JointAction, PrimitiveAction};

mod enumerate;

pub mod error;
pub use error::{ScenarioError, TransitionError};

mod evaluation;
pub use evaluation::{EvaluationWeights, Features};

mod joint;
pub use joint::{JointActions, UnitOptions};

mod position;
pub use position::{Direction, Position};

mod score;
pub use score::Scorable;

pub mod search;
pub use search::{AlphaBetaSearch, MoveOrdering, SearchOptions, SearchOutcome, SearchStats};

mod state;
pub use state::{build_root_state, ScenarioState, SearchNode, Snapshot, MAX_MAP_EXTENT};

mod transition;

mod unit;
pub use unit::{Role, Side, Unit, UnitId};
