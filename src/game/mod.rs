//! # Game Module
//!
//! The deterministic game core: shared grid geometry, state types, the dialog
//! and navigation state machines, the action resolver, and the top-level
//! event-handling engine.
//!
//! Everything in this module is pure and synchronous. Side effects exist only
//! as [`engine::Command`] values returned to the caller.

pub mod actions;
pub mod dialog;
pub mod engine;
pub mod inventory;
pub mod navigation;
pub mod state;

pub use actions::*;
pub use engine::*;
pub use inventory::*;
pub use state::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate on one map's tile grid.
///
/// # Examples
///
/// ```
/// use gatewood::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position one tile away in the given direction.
    pub fn step(self, direction: Direction) -> Position {
        self + direction.to_delta()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Cardinal directions for movement and map adjacency.
///
/// Movement is turn-based, one tile per keypress; there is no diagonal
/// movement in this game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use gatewood::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Returns the opposite direction.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Returns all 4 cardinal directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.x, 5);
        assert_eq!(pos.y, 10);
    }

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
        assert_eq!(pos1 - pos2, Position::new(2, 8));
    }

    #[test]
    fn test_position_step() {
        let pos = Position::new(4, 4);
        assert_eq!(pos.step(Direction::North), Position::new(4, 3));
        assert_eq!(pos.step(Direction::South), Position::new(4, 5));
        assert_eq!(pos.step(Direction::East), Position::new(5, 4));
        assert_eq!(pos.step(Direction::West), Position::new(3, 4));
    }

    #[test]
    fn test_direction_to_delta() {
        assert_eq!(Direction::North.to_delta(), Position::new(0, -1));
        assert_eq!(Direction::East.to_delta(), Position::new(1, 0));
    }

    #[test]
    fn test_direction_opposite() {
        for direction in Direction::all() {
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }
}
