//! Combat system
//!
//! Attack resolution, damage, death transitions, healing and the mana economy.

pub mod stats;
pub mod fighter;
pub mod death;

pub use stats::{effective_stats, EffectiveStats};
pub use fighter::{attack, clamp_to_max, heal, mana_buff, mana_decrease, take_damage};

/// Game-wide consequence of resolving an action
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    PlayerDied,
}

impl TurnOutcome {
    /// Combine two outcomes; a death anywhere wins
    pub fn merge(self, other: TurnOutcome) -> TurnOutcome {
        if self == TurnOutcome::PlayerDied || other == TurnOutcome::PlayerDied {
            TurnOutcome::PlayerDied
        } else {
            TurnOutcome::Continue
        }
    }

    pub fn player_died(self) -> bool {
        self == TurnOutcome::PlayerDied
    }
}
