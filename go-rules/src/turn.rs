use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Point;
use crate::stone::Stone;

/// One committed turn in the game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Turn {
    Play { stone: Stone, point: Point },
    Pass { stone: Stone },
}

impl Turn {
    pub fn stone(&self) -> Stone {
        match *self {
            Turn::Play { stone, .. } | Turn::Pass { stone } => stone,
        }
    }

    pub fn point(&self) -> Option<Point> {
        match *self {
            Turn::Play { point, .. } => Some(point),
            Turn::Pass { .. } => None,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Turn::Pass { .. })
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::Play { stone, point } => write!(f, "{} {},{}", stone.letter(), point.0, point.1),
            Turn::Pass { stone } => write!(f, "{} pass", stone.letter()),
        }
    }
}
