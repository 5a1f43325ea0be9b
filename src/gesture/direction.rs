//! Eight-way direction classification of a motion vector
//!
//! Directions are laid out as a 3x3 grid, numbered like a phone keypad:
//!
//! ```text
//! 1 2 3     left_up   up     right_up
//! 4 5 6     left      none   right
//! 7 8 9     left_down down   right_down
//! ```
//!
//! Coordinates follow the screen convention: negative `dy` points up.

use std::fmt;
use std::str::FromStr;

/// tan(22.5°), the minor/major ratio above which motion counts as diagonal
pub const OBLIQUE_RATIO: f64 = 0.414;

/// A swipe direction, or `Center` when there was no usable motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Direction {
    LeftUp = 1,
    Up = 2,
    RightUp = 3,
    Left = 4,
    Center = 5,
    Right = 6,
    LeftDown = 7,
    Down = 8,
    RightDown = 9,
}

impl Direction {
    /// Every direction a swipe can be bound to
    pub const SWIPES: [Direction; 8] = [
        Direction::LeftUp,
        Direction::Up,
        Direction::RightUp,
        Direction::Left,
        Direction::Right,
        Direction::LeftDown,
        Direction::Down,
        Direction::RightDown,
    ];

    /// Classify an accumulated `(dx, dy)` motion
    pub fn classify(dx: f64, dy: f64) -> Direction {
        if dx == 0.0 && dy == 0.0 {
            return Direction::Center;
        }

        let mut code: i8 = 5;
        let horizontal: i8 = if dx < 0.0 { -1 } else { 1 };
        let vertical: i8 = if dy < 0.0 { -3 } else { 3 };

        if dx.abs() > dy.abs() {
            code += horizontal;
            if dy.abs() / dx.abs() > OBLIQUE_RATIO {
                code += vertical;
            }
        } else {
            code += vertical;
            if dx.abs() / dy.abs() > OBLIQUE_RATIO {
                code += horizontal;
            }
        }

        // Both shifts stay inside the grid, so the code is always 1..=9
        Direction::from_code(code as u8).unwrap_or(Direction::Center)
    }

    /// Grid code of this direction (1..=9)
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Direction> {
        let direction = match code {
            1 => Direction::LeftUp,
            2 => Direction::Up,
            3 => Direction::RightUp,
            4 => Direction::Left,
            5 => Direction::Center,
            6 => Direction::Right,
            7 => Direction::LeftDown,
            8 => Direction::Down,
            9 => Direction::RightDown,
            _ => return None,
        };
        Some(direction)
    }

    /// Configuration name of the direction
    pub fn name(self) -> &'static str {
        match self {
            Direction::LeftUp => "left_up",
            Direction::Up => "up",
            Direction::RightUp => "right_up",
            Direction::Left => "left",
            Direction::Center => "none",
            Direction::Right => "right",
            Direction::LeftDown => "left_down",
            Direction::Down => "down",
            Direction::RightDown => "right_down",
        }
    }

    /// Diagonal directions (and the center) sit on odd grid codes
    pub fn is_oblique(self) -> bool {
        self.code() % 2 != 0
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::SWIPES
            .into_iter()
            .find(|direction| direction.name() == s)
            .ok_or_else(|| format!("Unknown direction: {s}"))
    }
}
