use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{ScenarioState, Side, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Weights of the linear evaluation. Positive weights favour the maximizing side
///
/// The defaults are:
/// ```
/// use skirmish_minimax::EvaluationWeights;
///
/// let defaults = EvaluationWeights::default();
///
/// assert_eq!(defaults.maximizer_health, 1.0);
/// assert_eq!(defaults.minimizer_health, -2.0);
/// assert_eq!(defaults.maximizer_count, 10.0);
/// assert_eq!(defaults.minimizer_count, -20.0);
/// assert_eq!(defaults.nearest_enemy_distance, -5.0);
/// assert_eq!(defaults.obstruction, 0.0);
/// ```
pub struct EvaluationWeights {
    /// Applied to the summed health of the maximizing side
    pub maximizer_health: f64,
    /// Applied to the summed health of the minimizing side
    pub minimizer_health: f64,
    /// Applied to the number of living maximizing units
    pub maximizer_count: f64,
    /// Applied to the number of living minimizing units
    pub minimizer_count: f64,
    /// Applied to the average distance from each maximizing unit to its nearest enemy
    pub nearest_enemy_distance: f64,
    /// Applied to the average number of obstacles between each maximizing unit and its nearest
    /// enemy. Left at zero the feature isn't computed at all
    pub obstruction: f64,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            maximizer_health: 1.0,
            minimizer_health: -2.0,
            maximizer_count: 10.0,
            minimizer_count: -20.0,
            nearest_enemy_distance: -5.0,
            obstruction: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// The raw features the evaluation is built from
pub struct Features {
    /// Summed wider than a single unit's health so large squads can't overflow
    pub maximizer_health: i64,
    #[allow(missing_docs)]
    pub minimizer_health: i64,
    #[allow(missing_docs)]
    pub maximizer_count: usize,
    #[allow(missing_docs)]
    pub minimizer_count: usize,
    /// Zero when either side has no units left
    pub nearest_enemy_distance: f64,
    /// Zero when either side has no units left, `None` when it wasn't asked for
    pub obstruction: Option<f64>,
}

impl Features {
    /// Weighted sum of the features
    pub fn weighted(&self, weights: &EvaluationWeights) -> f64 {
        weights.maximizer_health * self.maximizer_health as f64
            + weights.minimizer_health * self.minimizer_health as f64
            + weights.maximizer_count * self.maximizer_count as f64
            + weights.minimizer_count * self.minimizer_count as f64
            + weights.nearest_enemy_distance * self.nearest_enemy_distance
            + weights.obstruction * self.obstruction.unwrap_or(0.0)
    }
}

impl ScenarioState {
    /// Heuristic value of this state, higher is better for the maximizing side
    pub fn evaluate(&self, weights: &EvaluationWeights) -> f64 {
        self.features(weights.obstruction != 0.0).weighted(weights)
    }

    /// Compute the evaluation features, optionally including the obstruction count
    pub fn features(&self, with_obstruction: bool) -> Features {
        let maximizers = self.units_of(Side::Maximizing).collect_vec();
        let minimizers = self.units_of(Side::Minimizing).collect_vec();

        let mut features = Features {
            maximizer_health: maximizers.iter().map(|u| i64::from(u.health)).sum(),
            minimizer_health: minimizers.iter().map(|u| i64::from(u.health)).sum(),
            maximizer_count: maximizers.len(),
            minimizer_count: minimizers.len(),
            ..Default::default()
        };

        if maximizers.is_empty() || minimizers.is_empty() {
            features.obstruction = with_obstruction.then_some(0.0);
            return features;
        }

        let pairs = maximizers
            .iter()
            .filter_map(|unit| nearest_enemy(unit, &minimizers).map(|enemy| (*unit, enemy)))
            .collect_vec();
        let count = maximizers.len() as f64;

        features.nearest_enemy_distance = pairs
            .iter()
            .map(|(unit, enemy)| unit.position.euclidean_distance(&enemy.position))
            .sum::<f64>()
            / count;

        if with_obstruction {
            let blocked: usize = pairs
                .iter()
                .map(|(unit, enemy)| {
                    self.obstacles
                        .iter()
                        .filter(|cell| cell.within_rectangle(&unit.position, &enemy.position))
                        .count()
                })
                .sum();

            features.obstruction = Some(blocked as f64 / count);
        }

        features
    }
}

fn nearest_enemy<'a>(unit: &Unit, enemies: &[&'a Unit]) -> Option<&'a Unit> {
    enemies.iter().copied().min_by(|a, b| {
        unit.position
            .euclidean_distance(&a.position)
            .total_cmp(&unit.position.euclidean_distance(&b.position))
    })
}
