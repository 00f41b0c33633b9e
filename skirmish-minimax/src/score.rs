use crate::{EvaluationWeights, ScenarioState};

/// This trait is used to control something that can return a score from a scenario state
///
/// The search only ever calls this on leaves: states at the depth limit, terminal states, and
/// states where the side to move has nothing to do
pub trait Scorable {
    /// Convert the given state into a score, higher is better for the maximizing side
    fn score(&self, state: &ScenarioState) -> f64;
}

impl<FnLike: Fn(&ScenarioState) -> f64> Scorable for FnLike {
    fn score(&self, state: &ScenarioState) -> f64 {
        (self)(state)
    }
}

impl Scorable for EvaluationWeights {
    fn score(&self, state: &ScenarioState) -> f64 {
        state.evaluate(self)
    }
}
