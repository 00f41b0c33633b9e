use std::time::{Duration, Instant};

use tracing::{info, info_span, warn};

use crate::{ScenarioState, Scorable, Side};

use super::{AlphaBetaSearch, SearchOutcome};

impl<ScorableType> AlphaBetaSearch<ScorableType>
where
    ScorableType: Scorable,
{
    /// This will do an iterative deepening search up to `max_depth`. Iterative deepening means
    /// it will first search a single ply, then two plies with the best joint action of the
    /// previous round explored first. This lets the Alpha-Beta pruning cut more of the deeper
    /// trees. We keep going until `max_depth` is searched, until a round resolved every line
    /// before hitting its depth limit, or until `time_budget` has run out.
    ///
    /// The budget is only checked between rounds, a round that has started always finishes.
    /// Returns the depth of the last completed round together with its outcome
    pub fn deepened_search(
        &self,
        side: Side,
        root: &ScenarioState,
        max_depth: usize,
        time_budget: Option<Duration>,
    ) -> (usize, SearchOutcome) {
        let span = info_span!(
            "deepened_search",
            max_depth,
            ply = root.ply(),
            side = %side,
            reached_depth = tracing::field::Empty,
        );
        let _guard = span.enter();

        let started_at = Instant::now();
        let mut current = (0, self.search_for(side, root, 0));

        for depth in 1..=max_depth {
            if let Some(budget) = time_budget {
                if depth > 1 && started_at.elapsed() >= budget {
                    warn!(
                        depth = current.0,
                        elapsed_ms = started_at.elapsed().as_millis() as u64,
                        "out of time, using the last completed depth"
                    );
                    break;
                }
            }

            let hint = current.1.best.joint_action.clone();
            let first = (!hint.is_empty()).then_some(&hint);
            let outcome = self.run(
                side,
                root,
                depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
                first,
            );

            info!(
                depth,
                value = outcome.value,
                action = %outcome.best.joint_action,
                "finished depth"
            );

            let resolved = outcome.stats.cutoff_leaves == 0;
            current = (depth, outcome);

            if resolved {
                info!(depth, "every line ended before the depth limit, no need to keep going");
                break;
            }
        }

        span.record("reached_depth", current.0);

        current
    }
}
