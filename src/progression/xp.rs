//! Experience and leveling
//!
//! Level-up thresholds and the stat a player picks on each new level.

use hecs::{Entity, World};

use crate::combat::{self, EffectiveStats};
use crate::ecs::Fighter;

/// XP needed to advance past `level`
pub fn level_up_threshold(level: u32, base: u32, factor: u32) -> u32 {
    base + level * factor
}

/// Stat raised on level-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelUpChoice {
    Constitution,
    Strength,
    Agility,
    Intellect,
}

impl LevelUpChoice {
    pub const ALL: [LevelUpChoice; 4] = [
        LevelUpChoice::Constitution,
        LevelUpChoice::Strength,
        LevelUpChoice::Agility,
        LevelUpChoice::Intellect,
    ];

    /// Menu line showing the gain against the current value
    pub fn describe(self, stats: &EffectiveStats) -> String {
        match self {
            LevelUpChoice::Constitution => format!("Constitution (+20 HP, from {})", stats.max_hp),
            LevelUpChoice::Strength => format!("Strength (+1 attack, from {})", stats.power),
            LevelUpChoice::Agility => format!("Agility (+1 defense, from {})", stats.defense),
            LevelUpChoice::Intellect => format!("Intellect (+10 MP, from {})", stats.max_mp),
        }
    }
}

/// Raise the chosen base stat
pub fn apply_level_up(world: &mut World, player: Entity, choice: LevelUpChoice) {
    {
        let Ok(mut fighter) = world.get::<&mut Fighter>(player) else {
            return;
        };
        match choice {
            LevelUpChoice::Constitution => fighter.base_max_hp += 20,
            LevelUpChoice::Strength => fighter.base_power += 1,
            LevelUpChoice::Agility => fighter.base_defense += 1,
            LevelUpChoice::Intellect => fighter.base_max_mp += 10,
        }
    }
    if choice == LevelUpChoice::Constitution {
        combat::heal(world, player, 20);
    }
    log::debug!("Level-up choice: {choice:?}");
}
