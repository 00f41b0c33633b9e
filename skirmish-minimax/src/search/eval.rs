use derivative::Derivative;
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, trace};

use crate::{
    build_root_state, error::ScenarioError, EvaluationWeights, JointAction, ScenarioState, Scorable,
    SearchNode, Side, Snapshot,
};

use super::{MoveOrdering, SearchOutcome, SearchStats};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Optional properties that can be defined for an [AlphaBetaSearch]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use skirmish_minimax::{Direction, MoveOrdering, SearchOptions};
///
/// let defaults: SearchOptions = Default::default();
///
/// assert_eq!(
///     defaults.move_ordering,
///     MoveOrdering::Heuristic {
///         attack_weight: 3,
///         direction_weight: 1,
///         preferred_direction: Direction::South,
///     }
/// );
/// ```
pub struct SearchOptions {
    /// How joint actions should be ordered in the tree search
    pub move_ordering: MoveOrdering,
}

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// Depth limited minimax with alpha-beta pruning over [ScenarioState]s
///
/// Levels alternate between the two sides, starting with the side passed in at the root. The
/// maximizing side picks the child with the highest value, the minimizing side the lowest. Ties
/// go to the child explored first.
///
/// It also outputs traces using the [tracing] crate.
pub struct AlphaBetaSearch<ScorableType>
where
    ScorableType: Scorable,
{
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    options: SearchOptions,
}

impl AlphaBetaSearch<EvaluationWeights> {
    /// Construct a new `AlphaBetaSearch` scoring leaves with the linear evaluation
    pub fn from_weights(weights: EvaluationWeights, options: SearchOptions) -> Self {
        Self::new(weights, options)
    }
}

impl<ScorableType> AlphaBetaSearch<ScorableType>
where
    ScorableType: Scorable,
{
    /// Construct a new `AlphaBetaSearch`
    pub fn new(score_function: ScorableType, options: SearchOptions) -> Self {
        Self {
            score_function,
            options,
        }
    }

    /// Search `depth` plies ahead of `root` with the maximizing side to move and a full window
    ///
    /// A depth of 0 returns the root untouched
    pub fn search(&self, root: &ScenarioState, depth: usize) -> SearchOutcome {
        self.search_for(Side::Maximizing, root, depth)
    }

    /// Same as [AlphaBetaSearch::search] but with an explicit side to move at the root
    pub fn search_for(&self, side: Side, root: &ScenarioState, depth: usize) -> SearchOutcome {
        self.search_with_window(side, root, depth, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Search with a caller supplied `(alpha, beta)` window
    ///
    /// With anything narrower than the full window the returned value is only a bound when the
    /// true value falls outside of it
    pub fn search_with_window(
        &self,
        side: Side,
        root: &ScenarioState,
        depth: usize,
        alpha: f64,
        beta: f64,
    ) -> SearchOutcome {
        self.run(side, root, depth, alpha, beta, None)
    }

    /// Build the root from a snapshot and search it, the maximizing side moving first
    pub fn search_snapshot(
        &self,
        snapshot: Snapshot,
        depth: usize,
    ) -> Result<SearchOutcome, ScenarioError> {
        let root = build_root_state(snapshot)?;

        Ok(self.search(&root, depth))
    }

    pub(crate) fn run(
        &self,
        side: Side,
        root: &ScenarioState,
        depth: usize,
        alpha: f64,
        beta: f64,
        first: Option<&JointAction>,
    ) -> SearchOutcome {
        let span = info_span!(
            "alpha_beta",
            depth,
            ply = root.ply(),
            side = %side,
            chosen_value = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
            expanded = tracing::field::Empty,
        );

        span.in_scope(|| {
            let mut stats = SearchStats::default();
            let (best, value) = self.alpha_beta(root, side, depth, alpha, beta, first, &mut stats);
            let best = best.unwrap_or_else(|| SearchNode::root(root.clone()));

            span.record("chosen_value", value);
            span.record("chosen_action", format!("{}", best.joint_action).as_str());
            span.record("expanded", stats.expanded);

            SearchOutcome { best, value, stats }
        })
    }

    /// Returns the chosen child, `None` when this node is scored in place, and its value
    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &self,
        state: &ScenarioState,
        side: Side,
        depth: usize,
        alpha: f64,
        beta: f64,
        first: Option<&JointAction>,
        stats: &mut SearchStats,
    ) -> (Option<SearchNode>, f64) {
        let mut alpha = alpha;
        let mut beta = beta;

        if depth == 0 || state.is_terminal() {
            stats.leaves += 1;
            if depth == 0 && !state.is_terminal() {
                stats.cutoff_leaves += 1;
            }

            return (None, self.score_function.score(state));
        }

        stats.expanded += 1;

        let joint_actions = self
            .options
            .move_ordering
            .order(state.joint_actions(side), first);

        let is_maximizing = side == Side::Maximizing;
        let mut v = if is_maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut best: Option<SearchNode> = None;

        for joint_action in joint_actions {
            let child = state.child(joint_action);
            let (_, value) = self.alpha_beta(
                &child.resulting_state,
                side.opponent(),
                depth - 1,
                alpha,
                beta,
                None,
                stats,
            );

            if is_maximizing {
                if best.is_none() || value > v {
                    v = value;
                    best = Some(child);
                }
                if v >= beta {
                    trace!(depth, v, beta, "beta cutoff");
                    stats.prunes += 1;
                    break;
                }
                alpha = alpha.max(v);
            } else {
                if best.is_none() || value < v {
                    v = value;
                    best = Some(child);
                }
                if v <= alpha {
                    trace!(depth, v, alpha, "alpha cutoff");
                    stats.prunes += 1;
                    break;
                }
                beta = beta.min(v);
            }
        }

        match best {
            Some(best) => (Some(best), v),
            None => {
                debug!(ply = state.ply(), side = %side, "no joint action available, scoring in place");
                stats.blocked += 1;
                stats.leaves += 1;

                (None, self.score_function.score(state))
            }
        }
    }
}
