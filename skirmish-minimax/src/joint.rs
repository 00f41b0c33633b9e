use crate::{JointAction, Position, PrimitiveAction, UnitId};

#[derive(Debug, Clone, PartialEq, Eq)]
/// The legal actions of a single unit, plus where it stands so moves can be resolved to a cell
pub struct UnitOptions {
    #[allow(missing_docs)]
    pub unit: UnitId,
    #[allow(missing_docs)]
    pub origin: Position,
    #[allow(missing_docs)]
    pub actions: Vec<PrimitiveAction>,
}

impl UnitOptions {
    fn destination(&self, choice: usize) -> Option<Position> {
        self.actions[choice]
            .direction()
            .map(|d| self.origin.step(d))
    }
}

#[derive(Debug, Clone)]
/// Lazily walks the cross product of every unit's legal actions
///
/// This works like an odometer where each unit is a wheel. Before a wheel settles on a move, the
/// destination is checked against the moves already chosen by the wheels before it, and a
/// clash skips that choice straight away. This means a conflicting prefix never gets expanded
/// into the combinations below it.
///
/// Units without any legal action are left out of every combination. If no unit has an action
/// there is nothing to generate, the empty joint action is never yielded
pub struct JointActions {
    options: Vec<UnitOptions>,
    cursor: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl JointActions {
    /// Build the generator. Nothing is enumerated until it is iterated
    pub fn new(options: Vec<UnitOptions>) -> Self {
        let options: Vec<UnitOptions> = options
            .into_iter()
            .filter(|o| !o.actions.is_empty())
            .collect();
        let exhausted = options.is_empty();

        Self {
            cursor: Vec::with_capacity(options.len()),
            options,
            started: false,
            exhausted,
        }
    }

    /// Upper bound on the number of joint actions, ignoring conflicts
    pub fn unfiltered_len(&self) -> usize {
        if self.options.is_empty() {
            return 0;
        }

        self.options.iter().map(|o| o.actions.len()).product()
    }

    fn conflicts(&self, level: usize, choice: usize) -> bool {
        let Some(destination) = self.options[level].destination(choice) else {
            return false;
        };

        self.cursor[..level]
            .iter()
            .enumerate()
            .any(|(earlier, &c)| self.options[earlier].destination(c) == Some(destination))
    }

    fn current(&self) -> JointAction {
        self.options
            .iter()
            .zip(&self.cursor)
            .map(|(o, &c)| (o.unit, o.actions[c]))
            .collect()
    }
}

impl Iterator for JointActions {
    type Item = JointAction;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        if self.started {
            if let Some(last) = self.cursor.last_mut() {
                *last += 1;
            }
        } else {
            self.started = true;
            self.cursor.push(0);
        }

        loop {
            let level = self.cursor.len() - 1;
            let choice = self.cursor[level];

            if choice >= self.options[level].actions.len() {
                self.cursor.pop();
                match self.cursor.last_mut() {
                    Some(previous) => *previous += 1,
                    None => {
                        self.exhausted = true;
                        return None;
                    }
                }
                continue;
            }

            if self.conflicts(level, choice) {
                self.cursor[level] += 1;
                continue;
            }

            if level + 1 == self.options.len() {
                return Some(self.current());
            }

            self.cursor.push(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::Direction;

    use super::*;

    fn options(id: u32, x: i32, y: i32, actions: Vec<PrimitiveAction>) -> UnitOptions {
        UnitOptions {
            unit: UnitId(id),
            origin: Position::new(x, y),
            actions,
        }
    }

    #[test]
    fn test_full_cross_product_without_conflicts() {
        let generator = JointActions::new(vec![
            options(
                1,
                0,
                0,
                vec![
                    PrimitiveAction::Move(Direction::South),
                    PrimitiveAction::Move(Direction::East),
                ],
            ),
            options(
                2,
                5,
                5,
                vec![
                    PrimitiveAction::Move(Direction::North),
                    PrimitiveAction::Move(Direction::West),
                    PrimitiveAction::Attack(UnitId(9)),
                ],
            ),
        ]);
        assert_eq!(generator.unfiltered_len(), 6);

        let all: HashSet<JointAction> = generator.collect();
        assert_eq!(all.len(), 6);
        assert!(all.iter().all(|j| j.len() == 2));
    }

    #[test]
    fn test_moves_into_the_same_cell_are_filtered() {
        // Both units can only reach (3, 3)
        let generator = JointActions::new(vec![
            options(1, 3, 2, vec![PrimitiveAction::Move(Direction::South)]),
            options(2, 2, 3, vec![PrimitiveAction::Move(Direction::East)]),
        ]);

        assert_eq!(generator.count(), 0);
    }

    #[test]
    fn test_conflict_only_removes_the_clashing_pairs() {
        let generator = JointActions::new(vec![
            options(
                1,
                3,
                2,
                vec![
                    PrimitiveAction::Move(Direction::South),
                    PrimitiveAction::Attack(UnitId(7)),
                ],
            ),
            options(
                2,
                2,
                3,
                vec![
                    PrimitiveAction::Move(Direction::East),
                    PrimitiveAction::Move(Direction::West),
                ],
            ),
        ]);

        let all: Vec<JointAction> = generator.collect();
        assert_eq!(all.len(), 3);
        for joint in &all {
            let both_into_3_3 = joint.get(&UnitId(1))
                == Some(&PrimitiveAction::Move(Direction::South))
                && joint.get(&UnitId(2)) == Some(&PrimitiveAction::Move(Direction::East));
            assert!(!both_into_3_3);
        }
    }

    #[test]
    fn test_attacks_never_conflict() {
        let generator = JointActions::new(vec![
            options(1, 0, 0, vec![PrimitiveAction::Attack(UnitId(5))]),
            options(2, 0, 2, vec![PrimitiveAction::Attack(UnitId(5))]),
        ]);

        let all: Vec<JointAction> = generator.collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].attack_count(), 2);
    }

    #[test]
    fn test_units_without_actions_are_skipped() {
        let generator = JointActions::new(vec![
            options(1, 0, 0, vec![]),
            options(
                2,
                1,
                1,
                vec![
                    PrimitiveAction::Move(Direction::South),
                    PrimitiveAction::Move(Direction::North),
                ],
            ),
        ]);

        let all: Vec<JointAction> = generator.collect();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|j| j.get(&UnitId(1)).is_none()));
    }

    #[test]
    fn test_nothing_to_generate() {
        assert_eq!(JointActions::new(vec![]).count(), 0);
        assert_eq!(JointActions::new(vec![options(1, 0, 0, vec![])]).count(), 0);
    }

    #[test]
    fn test_three_units_with_a_middle_conflict() {
        // Units 1 and 3 can both step into (1, 1), unit 2 is free to do anything
        let generator = JointActions::new(vec![
            options(
                1,
                1,
                0,
                vec![
                    PrimitiveAction::Move(Direction::South),
                    PrimitiveAction::Move(Direction::East),
                ],
            ),
            options(
                2,
                5,
                5,
                vec![
                    PrimitiveAction::Move(Direction::North),
                    PrimitiveAction::Move(Direction::South),
                ],
            ),
            options(
                3,
                1,
                2,
                vec![
                    PrimitiveAction::Move(Direction::North),
                    PrimitiveAction::Move(Direction::West),
                ],
            ),
        ]);

        // 8 combinations, the 2 where both 1 and 3 enter (1, 1) are gone
        assert_eq!(generator.count(), 6);
    }
}
