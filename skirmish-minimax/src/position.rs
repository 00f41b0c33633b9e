use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// A grid cell. `y` grows towards the south.
pub struct Position {
    #[allow(missing_docs)]
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
}

impl Position {
    /// Construct a new `Position`
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step away in the given direction
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.displacement();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Number of four-directional steps between the two cells
    pub fn manhattan_distance(&self, other: &Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Straight line distance between the two cells
    pub fn euclidean_distance(&self, other: &Self) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);

        dx.hypot(dy)
    }

    /// Whether `self` lies inside the rectangle spanned by the two corners, edges included
    pub fn within_rectangle(&self, a: &Self, b: &Self) -> bool {
        (a.x.min(b.x)..=a.x.max(b.x)).contains(&self.x)
            && (a.y.min(b.y)..=a.y.max(b.y)).contains(&self.y)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// One of the four directions a unit can step in
pub enum Direction {
    #[allow(missing_docs)]
    North,
    #[allow(missing_docs)]
    East,
    #[allow(missing_docs)]
    South,
    #[allow(missing_docs)]
    West,
}

impl Direction {
    /// All the directions, in the order they are enumerated
    pub const fn all() -> [Self; 4] {
        [Self::North, Self::East, Self::South, Self::West]
    }

    /// The `(dx, dy)` offset of a single step
    pub const fn displacement(&self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };

        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_follows_displacement() {
        let origin = Position::new(2, 2);

        assert_eq!(origin.step(Direction::North), Position::new(2, 1));
        assert_eq!(origin.step(Direction::East), Position::new(3, 2));
        assert_eq!(origin.step(Direction::South), Position::new(2, 3));
        assert_eq!(origin.step(Direction::West), Position::new(1, 2));
    }

    #[test]
    fn test_distances() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);

        assert_eq!(a.manhattan_distance(&b), 7);
        assert_eq!(a.euclidean_distance(&b), 5.0);
        assert_eq!(b.manhattan_distance(&a), 7);
    }

    #[test]
    fn test_diagonal_is_two_steps() {
        let a = Position::new(1, 1);

        assert_eq!(a.manhattan_distance(&Position::new(2, 2)), 2);
    }

    #[test]
    fn test_within_rectangle() {
        let a = Position::new(3, 0);
        let b = Position::new(0, 2);

        assert!(Position::new(1, 1).within_rectangle(&a, &b));
        assert!(Position::new(3, 2).within_rectangle(&a, &b));
        assert!(!Position::new(4, 1).within_rectangle(&a, &b));
        assert!(!Position::new(1, 3).within_rectangle(&a, &b));
    }
}
