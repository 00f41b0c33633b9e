use std::{collections::BTreeMap, fmt::Display};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{Direction, UnitId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// The smallest thing a unit can do in a ply
pub enum PrimitiveAction {
    /// Step one cell in the given direction
    Move(Direction),
    /// Hit the unit with the given id
    Attack(UnitId),
}

impl PrimitiveAction {
    #[allow(missing_docs)]
    pub fn is_attack(&self) -> bool {
        matches!(self, PrimitiveAction::Attack(_))
    }

    /// The direction of a move, `None` for attacks
    pub fn direction(&self) -> Option<Direction> {
        match self {
            PrimitiveAction::Move(d) => Some(*d),
            PrimitiveAction::Attack(_) => None,
        }
    }
}

impl Display for PrimitiveAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrimitiveAction::Move(d) => write!(f, "move {}", d),
            PrimitiveAction::Attack(target) => write!(f, "attack {}", target),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// One primitive action for every unit of the side to move
///
/// Entries are kept ordered by unit id, which is also the order they get applied in
pub struct JointAction(BTreeMap<UnitId, PrimitiveAction>);

impl JointAction {
    /// A joint action with no entries, this is what the root of a search carries
    pub fn empty() -> Self {
        Self::default()
    }

    #[allow(missing_docs)]
    pub fn get(&self, unit: &UnitId) -> Option<&PrimitiveAction> {
        self.0.get(unit)
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the entries in ascending unit id
    pub fn iter(&self) -> impl Iterator<Item = (&UnitId, &PrimitiveAction)> {
        self.0.iter()
    }

    /// How many of the entries are attacks
    pub fn attack_count(&self) -> usize {
        self.0.values().filter(|a| a.is_attack()).count()
    }

    /// How many of the entries are moves in `direction`
    pub fn move_count(&self, direction: Direction) -> usize {
        self.0
            .values()
            .filter(|a| a.direction() == Some(direction))
            .count()
    }
}

impl FromIterator<(UnitId, PrimitiveAction)> for JointAction {
    fn from_iter<T: IntoIterator<Item = (UnitId, PrimitiveAction)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Display for JointAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "pass");
        }

        write!(
            f,
            "{}",
            self.iter()
                .map(|(id, action)| format!("{} {}", id, action))
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let joint: JointAction = [
            (UnitId(1), PrimitiveAction::Attack(UnitId(9))),
            (UnitId(2), PrimitiveAction::Move(Direction::South)),
            (UnitId(3), PrimitiveAction::Move(Direction::South)),
            (UnitId(4), PrimitiveAction::Move(Direction::East)),
        ]
        .into_iter()
        .collect();

        assert_eq!(joint.attack_count(), 1);
        assert_eq!(joint.move_count(Direction::South), 2);
        assert_eq!(joint.move_count(Direction::North), 0);
    }

    #[test]
    fn test_display_is_ordered_by_unit() {
        let joint: JointAction = [
            (UnitId(5), PrimitiveAction::Move(Direction::West)),
            (UnitId(2), PrimitiveAction::Attack(UnitId(7))),
        ]
        .into_iter()
        .collect();

        assert_eq!(format!("{}", joint), "#2 attack #7, #5 move west");
        assert_eq!(format!("{}", JointAction::empty()), "pass");
    }

    #[test]
    fn test_json_shape() {
        let joint: JointAction = [
            (UnitId(1), PrimitiveAction::Move(Direction::North)),
            (UnitId(2), PrimitiveAction::Attack(UnitId(3))),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            serde_json::to_string(&joint).unwrap(),
            r#"{"1":{"move":"north"},"2":{"attack":3}}"#
        );
    }
}
