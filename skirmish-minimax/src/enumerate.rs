use crate::{Direction, PrimitiveAction, ScenarioState, Unit};

impl ScenarioState {
    /// Whether `unit` may step in `direction` in this state
    ///
    /// The destination has to be on the map, not an obstacle, and not occupied by any unit
    pub fn can_move(&self, unit: &Unit, direction: Direction) -> bool {
        let destination = unit.position.step(direction);

        self.in_bounds(&destination)
            && !self.obstacles.contains(&destination)
            && !self.is_occupied(&destination)
    }

    /// Whether `attacker` can hit `target`. Only four-directional neighbours are in reach
    pub fn can_attack(&self, attacker: &Unit, target: &Unit) -> bool {
        attacker.is_enemy_of(target) && attacker.position.manhattan_distance(&target.position) <= 1
    }

    /// The individually legal actions of one unit. Moves come first, in [Direction::all] order,
    /// then attacks by ascending target id
    ///
    /// A boxed in unit with no enemy next to it gets an empty list
    pub fn legal_actions(&self, unit: &Unit) -> Vec<PrimitiveAction> {
        let moves = Direction::all()
            .into_iter()
            .filter(|d| self.can_move(unit, *d))
            .map(PrimitiveAction::Move);

        let attacks = self
            .units()
            .filter(|target| self.can_attack(unit, target))
            .map(|target| PrimitiveAction::Attack(target.id));

        moves.chain(attacks).collect()
    }
}
