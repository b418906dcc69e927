//! Level director
//!
//! Starting a run, building each level and descending the stairs.

use hecs::Entity;

use super::state::Game;
use super::turn::ActionResult;
use crate::colors;
use crate::combat;
use crate::data::GameConfig;
use crate::ecs::{AlwaysVisible, Name, Position, Renderable, Stairs};
use crate::entities::{populate_room, spawn_item, ItemKind};
use crate::items;
use crate::world::{generate_dungeon, GeneratedDungeon, GenerationError, Map};

/// Generation attempts on levels below the first before giving up
const DEEP_LEVEL_ATTEMPTS: u32 = 5;

impl Game {
    /// Start a fresh run on level 1 with the starting dagger worn
    pub fn new_game(config: GameConfig, seed: Option<u64>) -> Result<Self, GenerationError> {
        let seed = seed.unwrap_or_else(rand::random);
        log::info!("Starting new game with seed {seed}");

        let map = Map::new(config.map_width, config.map_height);
        let mut game = Game::empty(config, map, Position::new(0, 0), seed);
        let dungeon = game.generate(1)?;
        game.install_level(dungeon);

        game.message(
            "Welcome stranger! Prepare to perish in the Tombs of the Ancient Kings.",
            colors::RED,
        );

        let dagger = spawn_item(&mut game.world, ItemKind::Dagger, None);
        let player = game.player;
        if let Ok(mut inventory) = game.world.get::<&mut crate::ecs::Inventory>(player) {
            inventory.items.push(dagger);
        }
        items::equip(&mut game, dagger);
        Ok(game)
    }

    /// Take the stairs if the player is standing on them
    pub fn descend(&mut self) -> Result<ActionResult, GenerationError> {
        if !self.is_playing() || self.prompt.is_some() {
            return Ok(ActionResult::NoTurn);
        }
        let on_stairs = self
            .stairs
            .and_then(|stairs| self.position_of(stairs))
            .map_or(false, |pos| pos == self.player_pos());
        if !on_stairs {
            self.message("There are no stairs here.", colors::LIGHT_GRAY);
            return Ok(ActionResult::NoTurn);
        }
        self.next_level()?;
        Ok(ActionResult::TookTurn)
    }

    /// Rest, then build the next level down. The player, their stats and
    /// their pack carry over. Nothing changes if generation fails.
    pub fn next_level(&mut self) -> Result<(), GenerationError> {
        let dungeon = self.generate(self.depth + 1)?;

        self.message("You take a moment to rest, and recover your strength.", colors::LIGHT_VIOLET);
        let player = self.player;
        let half = self.player_stats().max_hp / 2;
        combat::heal(&mut self.world, player, half);

        self.message(
            "After a rare moment of peace, you descend deeper into the heart of the dungeon...",
            colors::RED,
        );
        self.depth += 1;
        log::info!("Descending to depth {}", self.depth);
        self.install_level(dungeon);
        Ok(())
    }

    /// Replace the current level's map and entities with a generated one
    fn install_level(&mut self, dungeon: GeneratedDungeon) {
        let start = dungeon.first_center();
        let stairs_pos = dungeon.last_center();
        let GeneratedDungeon { map, rooms } = dungeon;

        let player = self.player;
        for entity in std::mem::take(&mut self.objects) {
            if entity != player {
                let _ = self.world.despawn(entity);
            }
        }
        self.objects.push(player);
        self.map = map;

        if let Ok(mut pos) = self.world.get::<&mut Position>(player) {
            *pos = start;
        }

        for room in rooms.iter().skip(1) {
            populate_room(self, room);
        }

        let stairs = self.spawn_stairs(stairs_pos);
        self.stairs = Some(stairs);

        self.mark_fov_dirty();
        self.refresh_fov();
        log::info!(
            "Built depth {} with {} rooms and {} entities",
            self.depth,
            rooms.len(),
            self.objects.len()
        );
    }

    /// Lay out the level for `depth`; deeper levels retry a layout with no rooms
    fn generate(&mut self, depth: u32) -> Result<GeneratedDungeon, GenerationError> {
        let params = self.config.dungeon_params();
        let attempts = if depth <= 1 { 1 } else { DEEP_LEVEL_ATTEMPTS };
        let mut attempt = 1;
        loop {
            match generate_dungeon(&mut self.rng, &params) {
                Err(GenerationError::NoRooms { .. }) if attempt < attempts => {
                    log::warn!("Level generation placed no rooms (attempt {attempt}), retrying");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    fn spawn_stairs(&mut self, pos: Position) -> Entity {
        let stairs = self.world.spawn((
            Stairs,
            Name::new("stairs"),
            pos,
            Renderable::new('<', colors::WHITE),
            AlwaysVisible,
        ));
        self.add_object(stairs);
        self.send_to_back(stairs);
        stairs
    }
}
