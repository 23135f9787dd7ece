//! Translating user input into engine calls.
//!
//! Keyboard keys and touch swipes both resolve to a [`Direction`]; a text
//! front end additionally understands restart/quit through [`Command`].

use std::collections::HashMap;
use std::str::FromStr;

use crate::engine::Direction;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("unknown key: {0:?}")]
    UnknownKey(String),
    #[error("swipe needs two numeric deltas, got {0:?}")]
    BadSwipe(String),
    #[error("swipe too short to pick a direction")]
    NoSwipe,
    #[error("empty command")]
    Empty,
}

impl Direction {
    /// Map a key name to a direction.
    ///
    /// Accepts browser arrow-key names (`ArrowUp`, ...), the plain names
    /// `up/down/left/right` and `w/a/s/d`, all case-insensitive.
    pub fn from_key(name: &str) -> Result<Direction, InputError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "arrowup" | "up" | "w" => Ok(Direction::Up),
            "arrowdown" | "down" | "s" => Ok(Direction::Down),
            "arrowleft" | "left" | "a" => Ok(Direction::Left),
            "arrowright" | "right" | "d" => Ok(Direction::Right),
            _ => Err(InputError::UnknownKey(name.to_string())),
        }
    }

    /// Resolve a swipe from its start-to-end delta in screen coordinates
    /// (y grows downward).
    ///
    /// The dominant axis wins: horizontal only when `|dx| > |dy|`, so exact
    /// diagonals count as vertical. A zero-length or non-finite swipe gives
    /// `None`.
    ///
    /// ```
    /// use twenty48_engine::engine::Direction;
    /// assert_eq!(Direction::from_swipe(30.0, -4.0), Some(Direction::Right));
    /// assert_eq!(Direction::from_swipe(10.0, 10.0), Some(Direction::Down));
    /// assert_eq!(Direction::from_swipe(0.0, 0.0), None);
    /// ```
    pub fn from_swipe(dx: f64, dy: f64) -> Option<Direction> {
        if !(dx.is_finite() && dy.is_finite()) || (dx == 0.0 && dy == 0.0) {
            return None;
        }
        let dir = if dx.abs() > dy.abs() {
            if dx > 0.0 { Direction::Right } else { Direction::Left }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
        Some(dir)
    }
}

impl FromStr for Direction {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::from_key(s)
    }
}

/// One line of text input for a terminal front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Restart,
    Quit,
}

impl Command {
    /// Parse with extra key bindings checked before the built-in names.
    /// Bindings match case-insensitively, like the built-in names.
    pub fn parse_with(line: &str, keys: &HashMap<String, Direction>) -> Result<Command, InputError> {
        let name = line.trim();
        let bound = keys
            .iter()
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(name))
            .map(|(_, &dir)| dir);
        match bound {
            Some(dir) => Ok(Command::Move(dir)),
            None => line.parse(),
        }
    }
}

impl FromStr for Command {
    type Err = InputError;

    /// `restart`/`r`, `quit`/`q`/`exit`, `swipe DX DY`, or any key name
    /// accepted by [`Direction::from_key`]. Trailing tokens are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let head = parts.next().ok_or(InputError::Empty)?;
        let head = head.to_ascii_lowercase();
        if head != "swipe" && parts.next().is_some() {
            return Err(InputError::UnknownKey(s.trim().to_string()));
        }
        match head.as_str() {
            "restart" | "r" => Ok(Command::Restart),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            "swipe" => {
                let mut coord = || -> Result<f64, InputError> {
                    parts
                        .next()
                        .and_then(|p| p.parse().ok())
                        .ok_or_else(|| InputError::BadSwipe(s.trim().to_string()))
                };
                let (dx, dy) = (coord()?, coord()?);
                if parts.next().is_some() {
                    return Err(InputError::BadSwipe(s.trim().to_string()));
                }
                Direction::from_swipe(dx, dy)
                    .map(Command::Move)
                    .ok_or(InputError::NoSwipe)
            }
            _ => Direction::from_key(s.trim()).map(Command::Move),
        }
    }
}
