//! Game configuration
//!
//! Tunable constants loaded from `assets/config.ron`, with built-in defaults
//! for anything missing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::world::DungeonParams;

/// Default location of the config file, relative to the working directory
pub const CONFIG_PATH: &str = "assets/config.ron";

/// All tunable game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub map_width: i32,
    pub map_height: i32,
    pub room_min_size: i32,
    pub room_max_size: i32,
    pub max_rooms: u32,
    pub torch_radius: i32,
    /// Visible message lines
    pub message_height: usize,
    /// Message wrap width in columns
    pub message_width: usize,
    pub inventory_capacity: usize,
    pub spells: SpellConfig,
    /// XP to level up is `level_up_base + level * level_up_factor`
    pub level_up_base: u32,
    pub level_up_factor: u32,
}

/// Spell strengths and mana costs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellConfig {
    pub heal_amount: i32,
    pub heal_cost: i32,
    pub mana_amount: i32,
    pub mana_cost: i32,
    pub lightning_damage: i32,
    pub lightning_range: f64,
    pub lightning_cost: i32,
    pub confuse_range: f64,
    pub confuse_turns: u32,
    pub confuse_cost: i32,
    pub fireball_radius: f64,
    pub fireball_damage: i32,
    pub fireball_cost: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: 80,
            map_height: 43,
            room_min_size: 6,
            room_max_size: 10,
            max_rooms: 30,
            torch_radius: 10,
            message_height: 5,
            message_width: 58,
            inventory_capacity: 26,
            spells: SpellConfig::default(),
            level_up_base: 200,
            level_up_factor: 150,
        }
    }
}

impl Default for SpellConfig {
    fn default() -> Self {
        Self {
            heal_amount: 10,
            heal_cost: 1,
            mana_amount: 10,
            mana_cost: 0,
            lightning_damage: 20,
            lightning_range: 5.0,
            lightning_cost: 3,
            confuse_range: 8.0,
            confuse_turns: 10,
            confuse_cost: 8,
            fireball_radius: 3.0,
            fireball_damage: 12,
            fireball_cost: 5,
        }
    }
}

impl GameConfig {
    /// Load from the default path, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    /// Load from a RON file. A missing file silently yields defaults; an
    /// unreadable or malformed one is logged and also yields defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match ron::from_str::<GameConfig>(&content) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => log::warn!("Failed to parse {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Failed to read {}: {}", path.display(), e),
        }
        Self::default()
    }

    /// Generator parameters for one level
    pub fn dungeon_params(&self) -> DungeonParams {
        DungeonParams {
            width: self.map_width,
            height: self.map_height,
            max_rooms: self.max_rooms,
            room_min_size: self.room_min_size,
            room_max_size: self.room_max_size,
        }
    }

    /// XP needed to advance past `level`
    pub fn level_up_xp(&self, level: u32) -> u32 {
        crate::progression::level_up_threshold(level, self.level_up_base, self.level_up_factor)
    }
}
