//! Direction pointer (DP) and codel chooser (CC).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction pointer. Declaration order is the clockwise cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    pub const fn clockwise(self) -> Self {
        match self {
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Right,
        }
    }

    pub const fn counterclockwise(self) -> Self {
        match self {
            Direction::Right => Direction::Up,
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
        }
    }

    /// Rotates clockwise `turns` times (`turns` is taken mod 4).
    pub fn rotated(self, turns: u8) -> Self {
        (0..turns % 4).fold(self, |d, _| d.clockwise())
    }

    /// Unit vector `(dx, dy)`.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
        }
    }

    /// Perpendicular direction scanned to pick the exit corner for `cc`.
    pub const fn corner(self, cc: CodelChooser) -> Self {
        match (self, cc) {
            (Direction::Right, CodelChooser::Left) => Direction::Up,
            (Direction::Right, CodelChooser::Right) => Direction::Down,
            (Direction::Down, CodelChooser::Left) => Direction::Right,
            (Direction::Down, CodelChooser::Right) => Direction::Left,
            (Direction::Left, CodelChooser::Left) => Direction::Down,
            (Direction::Left, CodelChooser::Right) => Direction::Up,
            (Direction::Up, CodelChooser::Left) => Direction::Left,
            (Direction::Up, CodelChooser::Right) => Direction::Right,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Up => "up",
        };
        f.write_str(s)
    }
}

/// Codel chooser, relative to the direction pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CodelChooser {
    #[default]
    Left,
    Right,
}

impl CodelChooser {
    pub const fn toggled(self) -> Self {
        match self {
            CodelChooser::Left => CodelChooser::Right,
            CodelChooser::Right => CodelChooser::Left,
        }
    }
}

impl fmt::Display for CodelChooser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CodelChooser::Left => "left",
            CodelChooser::Right => "right",
        })
    }
}
