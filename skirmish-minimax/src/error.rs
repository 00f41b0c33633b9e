//! Errors surfaced by the state layer

use thiserror::Error;

use crate::{Position, Side, UnitId};

/// A snapshot that can't be turned into a [crate::ScenarioState]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("map extents must not be negative, got {width}x{height}")]
    #[allow(missing_docs)]
    InvalidExtents { width: i32, height: i32 },

    #[error("map extents {width}x{height} are larger than the supported {limit}")]
    #[allow(missing_docs)]
    MapTooLarge { width: i32, height: i32, limit: i32 },

    #[error("unit {0} appears more than once")]
    #[allow(missing_docs)]
    DuplicateUnit(UnitId),

    #[error("unit {unit} at {position} is outside the map")]
    #[allow(missing_docs)]
    OutOfBounds { unit: UnitId, position: Position },

    #[error("unit {unit} stands on the obstacle at {position}")]
    #[allow(missing_docs)]
    OnObstacle { unit: UnitId, position: Position },

    #[error("units {first} and {second} both occupy {position}")]
    #[allow(missing_docs)]
    Overlapping {
        first: UnitId,
        second: UnitId,
        position: Position,
    },

    #[error("unit {unit} has health {health}, only living units belong in a snapshot")]
    #[allow(missing_docs)]
    NotAlive { unit: UnitId, health: i32 },

    #[error("unit {unit} has attack power {attack_power}, it must be positive")]
    #[allow(missing_docs)]
    NoAttackPower { unit: UnitId, attack_power: i32 },
}

/// A joint action whose shape doesn't fit the state it is applied to
///
/// These point at a bug in whoever built the action, nothing is applied when one is returned
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error("unit {0} is not part of this state")]
    #[allow(missing_docs)]
    UnknownUnit(UnitId),

    #[error("unit {unit} does not belong to the side to move ({side})")]
    #[allow(missing_docs)]
    NotSideToMove { unit: UnitId, side: Side },

    #[error("unit {attacker} attacks {target} which is not part of this state")]
    #[allow(missing_docs)]
    UnknownTarget { attacker: UnitId, target: UnitId },

    #[error("unit {attacker} attacks {target} which is on the same side")]
    #[allow(missing_docs)]
    FriendlyTarget { attacker: UnitId, target: UnitId },
}
