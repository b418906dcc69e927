//! Game save/load system
//!
//! Handles saving and loading game state to/from disk. The draw-order list
//! and the inventory are stored as entity records; the player and stairs
//! are referenced by index into the draw-order records.

use std::fs;
use std::path::{Path, PathBuf};

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::colors::Rgb;
use crate::data::GameConfig;
use crate::ecs::{
    Ai, AlwaysVisible, BlocksMovement, Equipment, Fighter, Inventory, Item, Level, Name, Player,
    Position, Renderable, Stairs,
};
use crate::game::{Game, GameState, MessageLog, Prompt};
use crate::world::Map;

/// Save file version for compatibility checking
const SAVE_VERSION: u32 = 1;

/// Complete save data structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub state: GameState,
    pub depth: u32,
    pub map: Map,
    /// Map entities in draw order
    pub objects: Vec<EntitySaveData>,
    pub player_index: usize,
    pub stairs_index: Option<usize>,
    /// Carried items in pickup order
    pub inventory: Vec<EntitySaveData>,
    pub messages: MessageLog,
    pub player_level: u32,
    #[serde(default)]
    pub pending_level_up: bool,
}

/// One entity and whichever capabilities it has
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySaveData {
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    pub position: Option<Position>,
    pub blocks: bool,
    pub always_visible: bool,
    pub fighter: Option<Fighter>,
    pub ai: Option<Ai>,
    pub item: Option<Item>,
    pub equipment: Option<Equipment>,
}

impl EntitySaveData {
    fn capture(world: &World, entity: Entity) -> Result<Self, SaveError> {
        let render = world
            .get::<&Renderable>(entity)
            .map(|r| *r)
            .map_err(|_| SaveError::InvalidData(format!("entity {entity:?} has no appearance")))?;
        Ok(Self {
            name: world.get::<&Name>(entity).map(|n| n.0.clone()).unwrap_or_default(),
            glyph: render.glyph,
            color: render.color,
            position: world.get::<&Position>(entity).ok().map(|p| *p),
            blocks: world.get::<&BlocksMovement>(entity).is_ok(),
            always_visible: world.get::<&AlwaysVisible>(entity).is_ok(),
            fighter: world.get::<&Fighter>(entity).ok().map(|f| (*f).clone()),
            ai: world.get::<&Ai>(entity).ok().map(|a| (*a).clone()),
            item: world.get::<&Item>(entity).ok().map(|i| *i),
            equipment: world.get::<&Equipment>(entity).ok().map(|e| *e),
        })
    }

    fn spawn(&self, world: &mut World) -> Entity {
        let entity = world.spawn((Name::new(self.name.clone()), Renderable::new(self.glyph, self.color)));
        if let Some(pos) = self.position {
            let _ = world.insert_one(entity, pos);
        }
        if self.blocks {
            let _ = world.insert_one(entity, BlocksMovement);
        }
        if self.always_visible {
            let _ = world.insert_one(entity, AlwaysVisible);
        }
        if let Some(fighter) = &self.fighter {
            let _ = world.insert_one(entity, fighter.clone());
        }
        if let Some(ai) = &self.ai {
            let _ = world.insert_one(entity, ai.clone());
        }
        if let Some(item) = self.item {
            let _ = world.insert_one(entity, item);
        }
        if let Some(equipment) = self.equipment {
            let _ = world.insert_one(entity, equipment);
        }
        entity
    }
}

/// Save error types
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no saved game in slot {slot}")]
    NotFound { slot: u8 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("save file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("invalid save data: {0}")]
    InvalidData(String),
}

/// Get the save directory path
pub fn save_directory() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "ancient-tombs", "AncientTombs") {
        proj_dirs.data_local_dir().join("saves")
    } else {
        PathBuf::from("./saves")
    }
}

/// Path of a slot inside a save directory
pub fn save_path(dir: &Path, slot: u8) -> PathBuf {
    dir.join(format!("save_{slot}.json"))
}

pub fn save_exists_in(dir: &Path, slot: u8) -> bool {
    save_path(dir, slot).exists()
}

/// Save the game to a slot in the user data directory
pub fn save_game(game: &Game, slot: u8) -> Result<(), SaveError> {
    save_game_in(&save_directory(), game, slot)
}

pub fn save_game_in(dir: &Path, game: &Game, slot: u8) -> Result<(), SaveError> {
    let save_data = extract_save_data(game)?;
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(&save_data)?;
    fs::write(save_path(dir, slot), json)?;
    log::info!("Game saved to slot {slot} (depth {})", game.depth());
    Ok(())
}

/// Load and restore a game from a slot in the user data directory
pub fn load_game(slot: u8, config: GameConfig) -> Result<Game, SaveError> {
    load_game_in(&save_directory(), slot, config)
}

pub fn load_game_in(dir: &Path, slot: u8, config: GameConfig) -> Result<Game, SaveError> {
    let save = read_save(dir, slot)?;
    let game = restore_game(save, config)?;
    log::info!("Game loaded from slot {slot}");
    Ok(game)
}

/// Read and version-check a save file without restoring it
pub fn read_save(dir: &Path, slot: u8) -> Result<SaveData, SaveError> {
    let path = save_path(dir, slot);
    if !path.exists() {
        return Err(SaveError::NotFound { slot });
    }
    let data = fs::read_to_string(&path)?;
    let save: SaveData = serde_json::from_str(&data)?;

    if save.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save.version,
        });
    }
    Ok(save)
}

pub fn delete_save(slot: u8) -> Result<(), SaveError> {
    delete_save_in(&save_directory(), slot)
}

pub fn delete_save_in(dir: &Path, slot: u8) -> Result<(), SaveError> {
    let path = save_path(dir, slot);
    if path.exists() {
        fs::remove_file(&path)?;
        log::info!("Deleted save slot {slot}");
    }
    Ok(())
}

/// Capture the current game state
pub fn extract_save_data(game: &Game) -> Result<SaveData, SaveError> {
    let world = game.world();
    let player = game.player();

    let objects = game
        .objects()
        .iter()
        .map(|&e| EntitySaveData::capture(world, e))
        .collect::<Result<Vec<_>, _>>()?;
    let player_index = game
        .objects()
        .iter()
        .position(|&e| e == player)
        .ok_or_else(|| SaveError::InvalidData("player is not on the map".to_string()))?;
    let stairs_index = game
        .stairs()
        .and_then(|stairs| game.objects().iter().position(|&e| e == stairs));
    let inventory = game
        .inventory()
        .into_iter()
        .map(|e| EntitySaveData::capture(world, e))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SaveData {
        version: SAVE_VERSION,
        state: game.state(),
        depth: game.depth(),
        map: game.map().clone(),
        objects,
        player_index,
        stairs_index,
        inventory,
        messages: game.messages().clone(),
        player_level: game.player_level(),
        pending_level_up: matches!(game.prompt(), Some(Prompt::LevelUp)),
    })
}

/// Rebuild a game from save data. A pending targeting prompt is not saved;
/// the item it was for is still in the pack.
pub fn restore_game(save: SaveData, config: GameConfig) -> Result<Game, SaveError> {
    let (width, height) = (save.map.width, save.map.height);
    if width <= 0 || height <= 0 {
        return Err(SaveError::InvalidData(format!("bad map size {width}x{height}")));
    }
    let expected = (width as usize).checked_mul(height as usize);
    if expected != Some(save.map.tiles.len()) {
        return Err(SaveError::InvalidData("map size does not match its tiles".to_string()));
    }
    let player_data = save
        .objects
        .get(save.player_index)
        .ok_or_else(|| SaveError::InvalidData(format!("player index {} out of range", save.player_index)))?;
    if player_data.fighter.is_none() || player_data.position.is_none() {
        return Err(SaveError::InvalidData("player record is incomplete".to_string()));
    }
    if let Some(idx) = save.stairs_index {
        if idx >= save.objects.len() {
            return Err(SaveError::InvalidData(format!("stairs index {idx} out of range")));
        }
    }

    let mut world = World::new();
    let objects: Vec<Entity> = save.objects.iter().map(|data| data.spawn(&mut world)).collect();
    let items: Vec<Entity> = save.inventory.iter().map(|data| data.spawn(&mut world)).collect();

    let player = objects[save.player_index];
    let _ = world.insert(player, (Player, Inventory { items }, Level(save.player_level.max(1))));
    let stairs = save.stairs_index.map(|idx| objects[idx]);
    if let Some(stairs) = stairs {
        let _ = world.insert_one(stairs, Stairs);
    }

    let mut game = Game::from_parts(config, save.map, world, objects, player, stairs);
    game.depth = save.depth;
    game.state = save.state;
    game.messages = save.messages;
    if save.pending_level_up && save.state == GameState::Playing {
        game.prompt = Some(Prompt::LevelUp);
    }
    game.refresh_fov();
    Ok(game)
}
