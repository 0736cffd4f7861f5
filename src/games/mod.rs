//! Game rule sets and bot strategists.

pub mod bingo;
pub mod xo;

use serde::{Deserialize, Serialize};

/// Bot difficulty tier, shared by every game's strategist.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::FromRepr,
)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Level 1: uniformly random legal moves.
    Easy = 1,
    /// Level 2: greedy heuristic (win/block for XO, line completion for bingo).
    Medium = 2,
    /// Level 3: lookahead (depth-limited minimax for XO, weighted scoring for bingo).
    Hard = 3,
}

impl Difficulty {
    /// Maps a stored numeric level to a tier, defaulting to [`Difficulty::Easy`]
    /// for out-of-range values (the original data occasionally omits the level).
    pub fn from_level(level: u8) -> Self {
        Self::from_repr(level).unwrap_or(Self::Easy)
    }

    /// The numeric level persisted in game documents (1..=3).
    pub fn level(self) -> u8 {
        self as u8
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}
