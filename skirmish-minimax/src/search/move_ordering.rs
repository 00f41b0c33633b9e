use std::cmp::Reverse;

use itertools::Either;
use serde::{Deserialize, Serialize};

use crate::{Direction, JointAction, JointActions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
/// How sibling joint actions should be ordered before the search descends into them
///
/// Ordering never changes the value the search returns, only how much of the tree gets pruned
pub enum MoveOrdering {
    /// Sort by a cheap proxy score, highest first. The proxy counts the attacks in a joint
    /// action and the moves towards `preferred_direction`
    Heuristic {
        #[allow(missing_docs)]
        attack_weight: i64,
        #[allow(missing_docs)]
        direction_weight: i64,
        /// The direction that usually closes the distance to the enemy on the expected maps
        preferred_direction: Direction,
    },
    /// Explore joint actions in the order they are generated
    Unordered,
}

impl Default for MoveOrdering {
    fn default() -> Self {
        MoveOrdering::Heuristic {
            attack_weight: 3,
            direction_weight: 1,
            preferred_direction: Direction::South,
        }
    }
}

impl MoveOrdering {
    /// The proxy score of a single joint action. Always zero when unordered
    pub fn proxy_score(&self, joint_action: &JointAction) -> i64 {
        match self {
            MoveOrdering::Heuristic {
                attack_weight,
                direction_weight,
                preferred_direction,
            } => {
                attack_weight * joint_action.attack_count() as i64
                    + direction_weight * joint_action.move_count(*preferred_direction) as i64
            }
            MoveOrdering::Unordered => 0,
        }
    }

    /// Order the generated joint actions. `first`, when it is one of them, is moved to the front
    ///
    /// Unordered generation without a `first` stays lazy, anything else has to be collected to
    /// be sorted. The sort is stable so equal scores keep their generated order
    pub fn order(
        &self,
        joint_actions: JointActions,
        first: Option<&JointAction>,
    ) -> impl Iterator<Item = JointAction> {
        if matches!(self, MoveOrdering::Unordered) && first.is_none() {
            return Either::Left(joint_actions);
        }

        let mut ordered: Vec<JointAction> = joint_actions.collect();
        ordered.sort_by_key(|j| Reverse(self.proxy_score(j)));

        if let Some(first) = first {
            if let Some(index) = ordered.iter().position(|j| j == first) {
                let promoted = ordered.remove(index);
                ordered.insert(0, promoted);
            }
        }

        Either::Right(ordered.into_iter())
    }
}
