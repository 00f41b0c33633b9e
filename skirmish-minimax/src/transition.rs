use tracing::trace;

use crate::{error::TransitionError, JointAction, PrimitiveAction, ScenarioState, Side};

impl ScenarioState {
    /// Apply a joint action chosen by `side`, producing the successor state
    ///
    /// The whole action is checked against this state before anything is applied: every key must
    /// be a living unit of `side`, and every attack must name a living enemy. Nothing about the
    /// legality of moves is re-checked here.
    ///
    /// Entries are applied in ascending unit id. A victim whose health reaches zero is removed
    /// straight away, so a later attack on it in the same joint action does nothing
    pub fn apply(
        &self,
        side: Side,
        joint_action: &JointAction,
    ) -> Result<ScenarioState, TransitionError> {
        for (id, action) in joint_action.iter() {
            let unit = self
                .units
                .get(id)
                .ok_or(TransitionError::UnknownUnit(*id))?;
            if unit.side() != side {
                return Err(TransitionError::NotSideToMove { unit: *id, side });
            }

            if let PrimitiveAction::Attack(target) = action {
                let victim = self
                    .units
                    .get(target)
                    .ok_or(TransitionError::UnknownTarget {
                        attacker: *id,
                        target: *target,
                    })?;
                if !unit.is_enemy_of(victim) {
                    return Err(TransitionError::FriendlyTarget {
                        attacker: *id,
                        target: *target,
                    });
                }
            }
        }

        Ok(self.apply_unchecked(joint_action))
    }

    /// Apply a joint action that is known to come from [ScenarioState::joint_actions]
    pub(crate) fn apply_unchecked(&self, joint_action: &JointAction) -> ScenarioState {
        let mut next = ScenarioState {
            units: self.units.clone(),
            map_width: self.map_width,
            map_height: self.map_height,
            obstacles: self.obstacles.clone(),
            ply: self.ply + 1,
        };

        for (id, action) in joint_action.iter() {
            match action {
                PrimitiveAction::Move(direction) => {
                    if let Some(unit) = next.units.get_mut(id) {
                        unit.position = unit.position.step(*direction);
                    }
                }
                PrimitiveAction::Attack(target) => {
                    let Some(attack_power) = next.units.get(id).map(|u| u.attack_power) else {
                        continue;
                    };
                    let Some(victim) = next.units.get_mut(target) else {
                        trace!(attacker = %id, target = %target, "target already removed");
                        continue;
                    };

                    victim.health = (victim.health - attack_power).max(0);
                    if victim.health == 0 {
                        next.units.remove(target);
                    }
                }
            }
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use crate::{build_root_state, Direction, Position, Role, Snapshot, Unit, UnitId};

    use super::*;

    fn unit(id: u32, role: Role, x: i32, y: i32, health: i32, attack_power: i32) -> Unit {
        Unit {
            id: UnitId(id),
            role,
            position: Position::new(x, y),
            health,
            attack_power,
        }
    }

    fn state(units: Vec<Unit>) -> ScenarioState {
        build_root_state(Snapshot {
            map_width: 4,
            map_height: 4,
            obstacles: vec![],
            units,
            ply: 3,
        })
        .unwrap()
    }

    fn joint(entries: Vec<(u32, PrimitiveAction)>) -> JointAction {
        entries
            .into_iter()
            .map(|(id, a)| (UnitId(id), a))
            .collect()
    }

    #[test]
    fn test_attack_reduces_health() {
        let s = state(vec![
            unit(1, Role::Melee, 0, 0, 10, 3),
            unit(2, Role::Ranged, 1, 0, 10, 2),
        ]);

        let next = s
            .apply(
                Side::Maximizing,
                &joint(vec![(1, PrimitiveAction::Attack(UnitId(2)))]),
            )
            .unwrap();

        assert_eq!(next.unit(&UnitId(2)).unwrap().health, 7);
        assert_eq!(next.ply(), 4);
        assert_eq!(s.unit(&UnitId(2)).unwrap().health, 10);
    }

    #[test]
    fn test_lethal_attack_removes_victim() {
        let s = state(vec![
            unit(1, Role::Melee, 0, 0, 10, 5),
            unit(2, Role::Ranged, 1, 0, 4, 2),
        ]);

        let next = s
            .apply(
                Side::Maximizing,
                &joint(vec![(1, PrimitiveAction::Attack(UnitId(2)))]),
            )
            .unwrap();

        assert!(next.unit(&UnitId(2)).is_none());
        assert!(next.is_terminal());
    }

    #[test]
    fn test_second_attack_on_a_removed_victim_is_a_no_op() {
        let s = state(vec![
            unit(1, Role::Melee, 0, 0, 10, 6),
            unit(3, Role::Melee, 1, 1, 10, 6),
            unit(2, Role::Ranged, 1, 0, 5, 2),
            unit(4, Role::Ranged, 4, 4, 5, 2),
        ]);

        let next = s
            .apply(
                Side::Maximizing,
                &joint(vec![
                    (1, PrimitiveAction::Attack(UnitId(2))),
                    (3, PrimitiveAction::Attack(UnitId(2))),
                ]),
            )
            .unwrap();

        assert!(next.unit(&UnitId(2)).is_none());
        assert_eq!(next.units().count(), 3);
    }

    #[test]
    fn test_two_partial_hits_add_up() {
        let s = state(vec![
            unit(1, Role::Melee, 0, 0, 10, 3),
            unit(3, Role::Melee, 1, 1, 10, 4),
            unit(2, Role::Ranged, 1, 0, 10, 2),
        ]);

        let next = s
            .apply(
                Side::Maximizing,
                &joint(vec![
                    (1, PrimitiveAction::Attack(UnitId(2))),
                    (3, PrimitiveAction::Attack(UnitId(2))),
                ]),
            )
            .unwrap();

        assert_eq!(next.unit(&UnitId(2)).unwrap().health, 3);
    }

    #[test]
    fn test_moves_update_positions() {
        let s = state(vec![
            unit(1, Role::Melee, 0, 0, 10, 3),
            unit(3, Role::Melee, 2, 2, 10, 4),
            unit(2, Role::Ranged, 4, 4, 10, 2),
        ]);

        let next = s
            .apply(
                Side::Maximizing,
                &joint(vec![
                    (1, PrimitiveAction::Move(Direction::South)),
                    (3, PrimitiveAction::Move(Direction::West)),
                ]),
            )
            .unwrap();

        assert_eq!(next.unit(&UnitId(1)).unwrap().position, Position::new(0, 1));
        assert_eq!(next.unit(&UnitId(3)).unwrap().position, Position::new(1, 2));
        assert_eq!(next.unit(&UnitId(2)).unwrap().position, Position::new(4, 4));
    }

    #[test]
    fn test_rejects_wrong_side_and_unknown_units() {
        let s = state(vec![
            unit(1, Role::Melee, 0, 0, 10, 3),
            unit(2, Role::Ranged, 1, 0, 10, 2),
        ]);

        assert_eq!(
            s.apply(
                Side::Minimizing,
                &joint(vec![(1, PrimitiveAction::Move(Direction::South))])
            ),
            Err(TransitionError::NotSideToMove {
                unit: UnitId(1),
                side: Side::Minimizing
            })
        );
        assert_eq!(
            s.apply(
                Side::Maximizing,
                &joint(vec![(9, PrimitiveAction::Move(Direction::South))])
            ),
            Err(TransitionError::UnknownUnit(UnitId(9)))
        );
    }

    #[test]
    fn test_rejects_bad_targets_without_applying_anything() {
        let s = state(vec![
            unit(1, Role::Melee, 0, 0, 10, 3),
            unit(3, Role::Melee, 0, 1, 10, 3),
            unit(2, Role::Ranged, 1, 0, 10, 2),
        ]);

        assert_eq!(
            s.apply(
                Side::Maximizing,
                &joint(vec![
                    (1, PrimitiveAction::Attack(UnitId(2))),
                    (3, PrimitiveAction::Attack(UnitId(1))),
                ])
            ),
            Err(TransitionError::FriendlyTarget {
                attacker: UnitId(3),
                target: UnitId(1)
            })
        );
        assert_eq!(
            s.apply(
                Side::Maximizing,
                &joint(vec![(1, PrimitiveAction::Attack(UnitId(42)))])
            ),
            Err(TransitionError::UnknownTarget {
                attacker: UnitId(1),
                target: UnitId(42)
            })
        );
    }
}
