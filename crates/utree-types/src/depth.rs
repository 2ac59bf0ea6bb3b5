//! Depth budgets for breadth-first traversals.
//!
//! Levels are absolute: the traversal root is level 0, its children level 1,
//! and so on. A budget decides which of those levels may be visited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The maximum BFS level a traversal may reach.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Depth {
    /// Only the root.
    Zero,
    /// The root and its immediate children.
    One,
    /// Every level.
    #[default]
    Infinite,
    /// Every level up to and including `n`.
    Bounded(u32),
}

impl Depth {
    /// Returns `true` if `level` lies within this budget.
    pub fn admits(self, level: u32) -> bool {
        match self {
            Self::Infinite => true,
            Self::One => level <= 1,
            Self::Zero => level == 0,
            Self::Bounded(n) => level <= n,
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => f.write_str("zero"),
            Self::One => f.write_str("one"),
            Self::Infinite => f.write_str("infinite"),
            Self::Bounded(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for Depth {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "zero" | "0" => Ok(Self::Zero),
            "one" | "1" => Ok(Self::One),
            "infinite" => Ok(Self::Infinite),
            other => other
                .parse::<u32>()
                .map(Self::Bounded)
                .map_err(|_| TypeError::InvalidDepth(s.to_string())),
        }
    }
}

impl TryFrom<String> for Depth {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Depth> for String {
    fn from(depth: Depth) -> Self {
        depth.to_string()
    }
}
