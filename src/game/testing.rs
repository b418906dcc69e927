//! Shared fixtures for unit tests

use super::Game;
use crate::data::GameConfig;
use crate::ecs::Position;
use crate::world::{Map, Rect};

/// A 20x20 open room with the player at (5, 5) and the view computed
pub fn arena() -> Game {
    let mut map = Map::new(20, 20);
    map.carve_room(&Rect::new(0, 0, 19, 19));
    Game::with_map(GameConfig::default(), map, Position::new(5, 5), 42)
}
