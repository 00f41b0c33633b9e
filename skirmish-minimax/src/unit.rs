use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Identifies a unit. Unique within a [crate::ScenarioState]
pub struct UnitId(pub u32);

impl Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// The two unit archetypes. Every melee unit fights for the maximizing side and every ranged
/// unit for the minimizing side
pub enum Role {
    #[allow(missing_docs)]
    Melee,
    #[allow(missing_docs)]
    Ranged,
}

impl Role {
    /// The side that units of this role fight for
    pub fn side(&self) -> Side {
        match self {
            Role::Melee => Side::Maximizing,
            Role::Ranged => Side::Minimizing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// One of the two teams in the search
pub enum Side {
    /// Side A, the melee squad. Higher evaluations are better for this side
    #[serde(alias = "max")]
    Maximizing,
    /// Side B, the ranged squad. Lower evaluations are better for this side
    #[serde(alias = "min")]
    Minimizing,
}

impl Side {
    /// The side that moves after this one
    pub fn opponent(&self) -> Self {
        match self {
            Side::Maximizing => Side::Minimizing,
            Side::Minimizing => Side::Maximizing,
        }
    }

    /// Side to move for a ply counter, even plies belong to the maximizing side
    pub fn for_ply(ply: u32) -> Self {
        if ply % 2 == 0 {
            Side::Maximizing
        } else {
            Side::Minimizing
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Maximizing => write!(f, "max"),
            Side::Minimizing => write!(f, "min"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// A single combatant as it exists in one snapshot
pub struct Unit {
    #[allow(missing_docs)]
    pub id: UnitId,
    #[allow(missing_docs)]
    pub role: Role,
    #[allow(missing_docs)]
    pub position: Position,
    /// Always positive for a unit that is part of a state
    pub health: i32,
    /// Damage dealt by one attack
    pub attack_power: i32,
}

impl Unit {
    /// Shorthand for `self.role.side()`
    pub fn side(&self) -> Side {
        self.role.side()
    }

    /// Whether the other unit fights for the other team
    pub fn is_enemy_of(&self, other: &Unit) -> bool {
        self.side() != other.side()
    }
}
