//! Depth limited, two player minimax with alpha-beta pruning
//!
//! The maximizing side is the melee squad and the minimizing side the ranged squad. Every level
//! of the tree is one ply in which the side to move picks a joint action for all of its units.
//! Leaves are scored with a [crate::Scorable], for the standard linear evaluation that is
//! [crate::EvaluationWeights].
//!
//! ```rust
//! use skirmish_minimax::{
//!     build_root_state, AlphaBetaSearch, EvaluationWeights, SearchOptions, Snapshot,
//! };
//!
//! // This is the shape the scenario is expected to arrive in from the simulation
//! let snapshot: Snapshot = serde_json::from_str(include_str!("../../fixtures/two_on_two.json")).unwrap();
//! let root = build_root_state(snapshot).unwrap();
//!
//! let search = AlphaBetaSearch::from_weights(EvaluationWeights::default(), SearchOptions::default());
//!
//! // Look three plies ahead, the melee squad moving first
//! let outcome = search.search(&root, 3);
//!
//! // This is the joint action to hand back to the simulation
//! let chosen = outcome.best.joint_action;
//! assert!(!chosen.is_empty());
//! ```

mod deepening;

mod move_ordering;
pub use move_ordering::MoveOrdering;

mod outcome;
pub use outcome::{SearchOutcome, SearchStats};

mod eval;
pub use eval::{AlphaBetaSearch, SearchOptions};
