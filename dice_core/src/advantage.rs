//! Advantage and disadvantage
//!
//! Advantage and disadvantage never stack: any number of sources on one side
//! count once, and one source on each side cancels to a normal roll.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a d20 is rolled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvantageState {
    /// Roll two d20, keep the lower
    Disadvantage,
    /// Roll a single d20
    #[default]
    Normal,
    /// Roll two d20, keep the higher
    Advantage,
}

impl AdvantageState {
    /// Build from independent advantage/disadvantage flags (both cancel)
    pub fn from_flags(has_advantage: bool, has_disadvantage: bool) -> Self {
        match (has_advantage, has_disadvantage) {
            (true, false) => AdvantageState::Advantage,
            (false, true) => AdvantageState::Disadvantage,
            _ => AdvantageState::Normal,
        }
    }

    /// Build from a signed accumulator, clamped to -1..=1
    pub fn from_net(net: i32) -> Self {
        match net.signum() {
            1 => AdvantageState::Advantage,
            -1 => AdvantageState::Disadvantage,
            _ => AdvantageState::Normal,
        }
    }

    /// Signed form: -1 disadvantage, 0 normal, +1 advantage
    pub fn net(&self) -> i8 {
        match self {
            AdvantageState::Disadvantage => -1,
            AdvantageState::Normal => 0,
            AdvantageState::Advantage => 1,
        }
    }

    /// Combine two states algebraically
    pub fn combine(self, other: AdvantageState) -> Self {
        Self::from_net(i32::from(self.net()) + i32::from(other.net()))
    }

    /// Number of d20s this state rolls
    pub fn dice_rolled(&self) -> usize {
        match self {
            AdvantageState::Normal => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for AdvantageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvantageState::Disadvantage => write!(f, "disadvantage"),
            AdvantageState::Normal => write!(f, "normal"),
            AdvantageState::Advantage => write!(f, "advantage"),
        }
    }
}
