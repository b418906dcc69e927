//! Game state
//!
//! The level context: map, entities in draw order, message log, RNG and the
//! run state. Every turn-resolution call takes it by `&mut`.

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::messages::{capitalize, MessageLog};
use super::turn::Prompt;
use crate::colors::Rgb;
use crate::combat::{effective_stats, EffectiveStats};
use crate::data::GameConfig;
use crate::ecs::{AlwaysVisible, EquipSlot, Equipment, Fighter, Inventory, Level, Name, Position};
use crate::entities::spawn_player;
use crate::world::{compute_fov, Map};

/// Run state of the current game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    Dead,
}

/// The main game struct holding one run
pub struct Game {
    pub(crate) state: GameState,
    pub(crate) world: World,
    pub(crate) map: Map,
    /// Entities on the map in draw order, index 0 drawn first
    pub(crate) objects: Vec<Entity>,
    pub(crate) player: Entity,
    pub(crate) stairs: Option<Entity>,
    pub(crate) depth: u32,
    pub(crate) messages: MessageLog,
    pub(crate) rng: StdRng,
    pub(crate) config: GameConfig,
    /// Suspends normal turns until answered
    pub(crate) prompt: Option<Prompt>,
    pub(crate) fov_dirty: bool,
}

/// Data for the character screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSheet {
    pub level: u32,
    pub xp: u32,
    pub next_level_xp: u32,
    pub hp: i32,
    pub mp: i32,
    pub stats: EffectiveStats,
}

impl Game {
    /// Skeleton game around a map: a player and nothing else
    pub(crate) fn empty(config: GameConfig, map: Map, player_pos: Position, seed: u64) -> Self {
        let mut world = World::new();
        let player = spawn_player(&mut world, player_pos);
        let messages = MessageLog::new(config.message_height, config.message_width);
        Self {
            state: GameState::Playing,
            world,
            map,
            objects: vec![player],
            player,
            stairs: None,
            depth: 1,
            messages,
            rng: StdRng::seed_from_u64(seed),
            config,
            prompt: None,
            fov_dirty: true,
        }
    }

    /// Start a game on a prepared map with no monsters, items or stairs
    pub fn with_map(config: GameConfig, map: Map, player_pos: Position, seed: u64) -> Self {
        let mut game = Self::empty(config, map, player_pos, seed);
        game.refresh_fov();
        game
    }

    /// Reassemble a game from an already-populated world. The RNG is
    /// reseeded; the FOV is left dirty.
    pub(crate) fn from_parts(
        config: GameConfig,
        map: Map,
        world: World,
        objects: Vec<Entity>,
        player: Entity,
        stairs: Option<Entity>,
    ) -> Self {
        let messages = MessageLog::new(config.message_height, config.message_width);
        Self {
            state: GameState::Playing,
            world,
            map,
            objects,
            player,
            stairs,
            depth: 1,
            messages,
            rng: StdRng::seed_from_u64(rand::random()),
            config,
            prompt: None,
            fov_dirty: true,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn objects(&self) -> &[Entity] {
        &self.objects
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn stairs(&self) -> Option<Entity> {
        self.stairs
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn message(&mut self, text: impl AsRef<str>, color: Rgb) {
        self.messages.push(text, color);
    }

    // ------------------------------------------------------------------
    // Entity helpers
    // ------------------------------------------------------------------

    pub fn name_of(&self, entity: Entity) -> String {
        self.world
            .get::<&Name>(entity)
            .map(|n| n.0.clone())
            .unwrap_or_default()
    }

    pub fn position_of(&self, entity: Entity) -> Option<Position> {
        self.world.get::<&Position>(entity).ok().map(|p| *p)
    }

    pub fn player_pos(&self) -> Position {
        self.position_of(self.player).unwrap_or(Position::new(0, 0))
    }

    pub fn player_alive(&self) -> bool {
        self.world
            .get::<&Fighter>(self.player)
            .map_or(false, |f| f.is_alive())
    }

    pub fn player_fighter(&self) -> Option<Fighter> {
        self.world.get::<&Fighter>(self.player).ok().map(|f| (*f).clone())
    }

    pub fn player_stats(&self) -> EffectiveStats {
        effective_stats(&self.world, self.player).unwrap_or_default()
    }

    pub fn player_level(&self) -> u32 {
        self.world.get::<&Level>(self.player).map_or(1, |l| l.0)
    }

    /// Put an entity on top of the draw order
    pub fn add_object(&mut self, entity: Entity) {
        if !self.objects.contains(&entity) {
            self.objects.push(entity);
        }
    }

    pub(crate) fn remove_object(&mut self, entity: Entity) {
        self.objects.retain(|&e| e != entity);
    }

    /// Move an entity to index 0 so it is drawn under everything else
    pub fn send_to_back(&mut self, entity: Entity) {
        if let Some(idx) = self.objects.iter().position(|&e| e == entity) {
            let e = self.objects.remove(idx);
            self.objects.insert(0, e);
        }
    }

    /// First fighter (other than `except`) standing on a tile, in draw order
    pub fn fighter_at(&self, pos: Position, except: Option<Entity>) -> Option<Entity> {
        self.objects.iter().copied().find(|&e| {
            Some(e) != except
                && self.world.get::<&Fighter>(e).is_ok()
                && self.position_of(e) == Some(pos)
        })
    }

    /// Carried items in pickup order
    pub fn inventory(&self) -> Vec<Entity> {
        self.world
            .get::<&Inventory>(self.player)
            .map(|inv| inv.items.clone())
            .unwrap_or_default()
    }

    /// Inventory menu lines, worn items suffixed with their slot
    pub fn inventory_labels(&self) -> Vec<String> {
        self.inventory()
            .into_iter()
            .map(|item| {
                let name = self.name_of(item);
                let worn: Option<EquipSlot> = self
                    .world
                    .get::<&Equipment>(item)
                    .ok()
                    .filter(|eq| eq.is_equipped)
                    .map(|eq| eq.slot);
                match worn {
                    Some(slot) => format!("{name} (on {})", slot.name()),
                    None => name,
                }
            })
            .collect()
    }

    /// Names of everything on a visible tile, comma-separated
    pub fn names_at(&self, pos: Position) -> String {
        if !self.map.is_visible(pos.x, pos.y) {
            return String::new();
        }
        self.objects
            .iter()
            .filter(|&&e| self.position_of(e) == Some(pos))
            .map(|&e| capitalize(&self.name_of(e)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Whether an entity should be drawn: in view, or remembered if it is
    /// always visible and its tile was explored
    pub fn is_drawn(&self, entity: Entity) -> bool {
        let Some(pos) = self.position_of(entity) else {
            return false;
        };
        self.map.is_visible(pos.x, pos.y)
            || (self.world.get::<&AlwaysVisible>(entity).is_ok() && self.map.is_explored(pos.x, pos.y))
    }

    pub fn character_sheet(&self) -> CharacterSheet {
        let level = self.player_level();
        let fighter = self.player_fighter();
        CharacterSheet {
            level,
            xp: fighter.as_ref().map_or(0, |f| f.xp),
            next_level_xp: self.config.level_up_xp(level),
            hp: fighter.as_ref().map_or(0, |f| f.hp),
            mp: fighter.as_ref().map_or(0, |f| f.mp),
            stats: self.player_stats(),
        }
    }

    // ------------------------------------------------------------------
    // Field of view
    // ------------------------------------------------------------------

    pub fn mark_fov_dirty(&mut self) {
        self.fov_dirty = true;
    }

    /// Recompute the field of view if the player moved or the level changed
    pub fn refresh_fov(&mut self) {
        if self.fov_dirty {
            self.recompute_fov();
        }
    }

    pub fn recompute_fov(&mut self) {
        let origin = self.player_pos();
        compute_fov(&mut self.map, origin, self.config.torch_radius);
        self.fov_dirty = false;
    }
}
