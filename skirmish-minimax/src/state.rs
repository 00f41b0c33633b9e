use std::{collections::BTreeMap, sync::Arc};

use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::{
    error::ScenarioError, JointAction, JointActions, Position, Side, Unit, UnitId, UnitOptions,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Everything the driver needs to hand over to start a search
///
/// This is the shape the scenario arrives in from outside, [build_root_state] checks it and turns
/// it into a [ScenarioState]
pub struct Snapshot {
    /// Largest valid x coordinate
    pub map_width: i32,
    /// Largest valid y coordinate
    pub map_height: i32,
    /// Cells no unit may ever enter
    #[serde(default)]
    pub obstacles: Vec<Position>,
    /// Every living unit, of both sides
    pub units: Vec<Unit>,
    /// The current turn counter
    #[serde(default)]
    pub ply: u32,
}

/// Largest `map_width` or `map_height` a snapshot may have
///
/// Keeps every step and distance between cells of the map well inside `i32`
pub const MAX_MAP_EXTENT: i32 = 1 << 16;

/// Build the root of a search from an outside snapshot
///
/// Rejects snapshots where unit ids repeat, units stand outside the map, on an obstacle or on
/// top of each other, where a unit has no health or no attack power, or where the map is
/// larger than [MAX_MAP_EXTENT]
pub fn build_root_state(snapshot: Snapshot) -> Result<ScenarioState, ScenarioError> {
    let Snapshot {
        map_width,
        map_height,
        obstacles,
        units,
        ply,
    } = snapshot;

    if map_width < 0 || map_height < 0 {
        return Err(ScenarioError::InvalidExtents {
            width: map_width,
            height: map_height,
        });
    }
    if map_width > MAX_MAP_EXTENT || map_height > MAX_MAP_EXTENT {
        return Err(ScenarioError::MapTooLarge {
            width: map_width,
            height: map_height,
            limit: MAX_MAP_EXTENT,
        });
    }

    let obstacles: FxHashSet<Position> = obstacles.into_iter().collect();
    let mut occupied: FxHashMap<Position, UnitId> = FxHashMap::default();
    let mut by_id = BTreeMap::new();

    for unit in units {
        if unit.health <= 0 {
            return Err(ScenarioError::NotAlive {
                unit: unit.id,
                health: unit.health,
            });
        }
        if unit.attack_power <= 0 {
            return Err(ScenarioError::NoAttackPower {
                unit: unit.id,
                attack_power: unit.attack_power,
            });
        }
        if !in_bounds(map_width, map_height, &unit.position) {
            return Err(ScenarioError::OutOfBounds {
                unit: unit.id,
                position: unit.position,
            });
        }
        if obstacles.contains(&unit.position) {
            return Err(ScenarioError::OnObstacle {
                unit: unit.id,
                position: unit.position,
            });
        }
        if let Some(first) = occupied.insert(unit.position, unit.id) {
            return Err(ScenarioError::Overlapping {
                first,
                second: unit.id,
                position: unit.position,
            });
        }
        if by_id.insert(unit.id, unit).is_some() {
            return Err(ScenarioError::DuplicateUnit(unit.id));
        }
    }

    Ok(ScenarioState {
        units: by_id,
        map_width,
        map_height,
        obstacles: Arc::new(obstacles),
        ply,
    })
}

fn in_bounds(map_width: i32, map_height: i32, position: &Position) -> bool {
    (0..=map_width).contains(&position.x) && (0..=map_height).contains(&position.y)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A full, immutable snapshot of the skirmish
///
/// Every transition builds a new state. The obstacle set is shared by every state derived from
/// the same root
pub struct ScenarioState {
    pub(crate) units: BTreeMap<UnitId, Unit>,
    pub(crate) map_width: i32,
    pub(crate) map_height: i32,
    pub(crate) obstacles: Arc<FxHashSet<Position>>,
    pub(crate) ply: u32,
}

impl ScenarioState {
    #[allow(missing_docs)]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    #[allow(missing_docs)]
    pub fn obstacles(&self) -> &FxHashSet<Position> {
        &self.obstacles
    }

    #[allow(missing_docs)]
    pub fn unit(&self, id: &UnitId) -> Option<&Unit> {
        self.units.get(id)
    }

    /// All living units in ascending id order
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    /// Living units of one side in ascending id order
    pub fn units_of(&self, side: Side) -> impl Iterator<Item = &Unit> {
        self.units.values().filter(move |u| u.side() == side)
    }

    /// Whether the cell is inside the map
    pub fn in_bounds(&self, position: &Position) -> bool {
        in_bounds(self.map_width, self.map_height, position)
    }

    /// Whether any unit, of either side, stands on the cell
    pub fn is_occupied(&self, position: &Position) -> bool {
        self.units.values().any(|u| &u.position == position)
    }

    /// A state is over once either side has been wiped out
    pub fn is_terminal(&self) -> bool {
        self.units_of(Side::Maximizing).next().is_none()
            || self.units_of(Side::Minimizing).next().is_none()
    }

    /// Every legal, non conflicting joint action for `side`, generated lazily
    pub fn joint_actions(&self, side: Side) -> JointActions {
        let options: Vec<UnitOptions> = self
            .units_of(side)
            .map(|unit| UnitOptions {
                unit: unit.id,
                origin: unit.position,
                actions: self.legal_actions(unit),
            })
            .collect_vec();

        JointActions::new(options)
    }

    /// Every child of this state when `side` moves, paired with the joint action producing it
    pub fn children(&self, side: Side) -> impl Iterator<Item = SearchNode> + '_ {
        self.joint_actions(side)
            .map(move |joint_action| self.child(joint_action))
    }

    /// Turn the state back into the outside shape, obstacles sorted so the output is stable
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            map_width: self.map_width,
            map_height: self.map_height,
            obstacles: self.obstacles.iter().copied().sorted().collect(),
            units: self.units.values().copied().collect(),
            ply: self.ply,
        }
    }

    pub(crate) fn child(&self, joint_action: JointAction) -> SearchNode {
        let resulting_state = self.apply_unchecked(&joint_action);

        SearchNode {
            joint_action,
            resulting_state,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A joint action together with the state it leads to
pub struct SearchNode {
    /// Empty for the root of a search
    pub joint_action: JointAction,
    #[allow(missing_docs)]
    pub resulting_state: ScenarioState,
}

impl SearchNode {
    /// Wrap a state as the root of a search
    pub fn root(state: ScenarioState) -> Self {
        Self {
            joint_action: JointAction::empty(),
            resulting_state: state,
        }
    }
}
