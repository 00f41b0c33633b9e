use serde::Serialize;

use crate::SearchNode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
/// Counters collected while searching, handy to see how well ordering helps pruning
pub struct SearchStats {
    /// Nodes whose children were generated
    pub expanded: usize,
    /// Nodes that were scored
    pub leaves: usize,
    /// Leaves that were scored only because the depth limit was hit
    pub cutoff_leaves: usize,
    /// Levels where the side to move had no joint action and was scored in place
    pub blocked: usize,
    /// Times the remaining siblings were skipped
    pub prunes: usize,
}

#[derive(Debug, Clone)]
/// What a search returns
pub struct SearchOutcome {
    /// The chosen joint action and the state it leads to. When no move was searched (depth 0,
    /// a terminal root, or a side with nothing to do) this is the root itself with an empty joint
    /// action
    pub best: SearchNode,
    /// The backed up minimax value of the root
    pub value: f64,
    #[allow(missing_docs)]
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// Whether the search found a move to make
    pub fn has_move(&self) -> bool {
        !self.best.joint_action.is_empty()
    }
}
