//! ECS Components
//!
//! All components used by dungeon entities. Capabilities (fighting, thinking,
//! being an item, being wearable) are optional components on an entity; the
//! entity handle is how a capability finds its owner.

use serde::{Deserialize, Serialize};

use crate::colors::Rgb;

// ============================================================================
// Position & Rendering
// ============================================================================

/// Position on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.distance(other.x, other.y)
    }

    /// Euclidean distance to a coordinate
    pub fn distance(&self, x: i32, y: i32) -> f64 {
        let dx = (x - self.x) as f64;
        let dy = (y - self.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Glyph and color drawn for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Renderable {
    pub glyph: char,
    pub color: Rgb,
}

impl Renderable {
    pub fn new(glyph: char, color: Rgb) -> Self {
        Self { glyph, color }
    }
}

// ============================================================================
// Identity & Markers
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Marks the player entity
#[derive(Debug, Clone, Copy, Default)]
pub struct Player;

/// Marks the level's down staircase
#[derive(Debug, Clone, Copy, Default)]
pub struct Stairs;

/// Entity occupies its tile; nothing else may move onto it
#[derive(Debug, Clone, Copy, Default)]
pub struct BlocksMovement;

/// Drawn whenever its tile is explored, even outside the field of view
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysVisible;

/// Character level of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level(pub u32);

impl Default for Level {
    fn default() -> Self {
        Self(1)
    }
}

// ============================================================================
// Combat
// ============================================================================

/// What happens when a fighter's hit points reach zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCallback {
    Player,
    Monster,
}

/// What happens when a fighter's mana is drained to exactly zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManalessCallback {
    None,
    Player,
}

/// Combat capability.
///
/// Only base values live here. Effective values add the bonuses of the
/// owner's equipped items and are derived on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    pub base_max_hp: i32,
    pub hp: i32,
    pub base_max_mp: i32,
    pub mp: i32,
    pub base_defense: i32,
    pub base_power: i32,
    /// XP awarded on death for monsters, accumulated XP for the player
    pub xp: u32,
    pub on_death: DeathCallback,
    pub on_manaless: ManalessCallback,
}

impl Fighter {
    /// A fighter at full health and mana
    pub fn new(hp: i32, mp: i32, defense: i32, power: i32, xp: u32, on_death: DeathCallback) -> Self {
        Self {
            base_max_hp: hp,
            hp,
            base_max_mp: mp,
            mp,
            base_defense: defense,
            base_power: power,
            xp,
            on_death,
            on_manaless: ManalessCallback::None,
        }
    }

    pub fn with_manaless(mut self, callback: ManalessCallback) -> Self {
        self.on_manaless = callback;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

// ============================================================================
// AI
// ============================================================================

/// Monster behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ai {
    /// Chases and attacks the player while in view
    Aggressive,
    /// Approaches the player while in view, never attacks
    Wanderer,
    /// Stumbles randomly, then reverts to `previous`
    Confused { previous: Box<Ai>, turns_left: u32 },
}

impl Ai {
    /// Confuse this behavior; re-confusing refreshes the timer but keeps the
    /// behavior the monster had before the first confusion
    pub fn confused(self, turns: u32) -> Ai {
        let previous = match self {
            Ai::Confused { previous, .. } => previous,
            other => Box::new(other),
        };
        Ai::Confused {
            previous,
            turns_left: turns,
        }
    }
}

// ============================================================================
// Items & Equipment
// ============================================================================

/// Effect applied when an item is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEffect {
    Heal,
    RestoreMana,
    Lightning,
    Fireball,
    Confuse,
}

/// Item capability: can be picked up, carried and dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub effect: Option<ItemEffect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    RightHand,
    LeftHand,
    Head,
    Neck,
}

impl EquipSlot {
    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::RightHand => "right hand",
            EquipSlot::LeftHand => "left hand",
            EquipSlot::Head => "head",
            EquipSlot::Neck => "neck",
        }
    }
}

/// Wearable capability; at most one equipped item per slot per owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub slot: EquipSlot,
    pub power_bonus: i32,
    pub defense_bonus: i32,
    pub max_hp_bonus: i32,
    pub max_mp_bonus: i32,
    pub is_equipped: bool,
}

impl Equipment {
    pub fn new(slot: EquipSlot) -> Self {
        Self {
            slot,
            power_bonus: 0,
            defense_bonus: 0,
            max_hp_bonus: 0,
            max_mp_bonus: 0,
            is_equipped: false,
        }
    }

    pub fn with_power(mut self, bonus: i32) -> Self {
        self.power_bonus = bonus;
        self
    }

    pub fn with_defense(mut self, bonus: i32) -> Self {
        self.defense_bonus = bonus;
        self
    }

    pub fn with_max_hp(mut self, bonus: i32) -> Self {
        self.max_hp_bonus = bonus;
        self
    }

    pub fn with_max_mp(mut self, bonus: i32) -> Self {
        self.max_mp_bonus = bonus;
        self
    }
}

/// Carried items, in pickup order. Carried items have no `Position`.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub items: Vec<hecs::Entity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_distance() {
        let a = Position::new(0, 0);
        assert_eq!(a.distance_to(&Position::new(3, 4)), 5.0);
        assert!((a.distance(1, 1) - 2f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_confusing_keeps_prior_behavior() {
        let ai = Ai::Aggressive.confused(10);
        let again = ai.confused(4);
        assert_eq!(
            again,
            Ai::Confused {
                previous: Box::new(Ai::Aggressive),
                turns_left: 4
            }
        );
    }

    #[test]
    fn test_new_fighter_is_full() {
        let f = Fighter::new(10, 5, 0, 3, 35, DeathCallback::Monster);
        assert_eq!(f.hp, f.base_max_hp);
        assert_eq!(f.mp, f.base_max_mp);
        assert!(f.is_alive());
        assert_eq!(f.on_manaless, ManalessCallback::None);
    }
}
