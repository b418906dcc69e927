//! Shared fixtures for integration tests.

use ancient_tombs::data::GameConfig;
use ancient_tombs::ecs::{Fighter, Inventory, Position};
use ancient_tombs::entities::{spawn_item, spawn_monster, ItemKind, MonsterKind};
use ancient_tombs::world::{Map, Rect};
use ancient_tombs::Game;
use hecs::Entity;

/// Open 18x18 room with the player at (5, 5) and nothing else
pub fn arena() -> Game {
    let mut map = Map::new(20, 20);
    map.carve_room(&Rect::new(0, 0, 19, 19));
    Game::with_map(GameConfig::default(), map, Position::new(5, 5), 7)
}

#[allow(dead_code)]
pub fn add_monster(game: &mut Game, kind: MonsterKind, x: i32, y: i32) -> Entity {
    let monster = spawn_monster(game.world_mut(), kind, Position::new(x, y));
    game.add_object(monster);
    monster
}

/// Put an item straight into the player's pack
#[allow(dead_code)]
pub fn give_item(game: &mut Game, kind: ItemKind) -> Entity {
    let player = game.player();
    let item = spawn_item(game.world_mut(), kind, None);
    game.world_mut()
        .get::<&mut Inventory>(player)
        .unwrap()
        .items
        .push(item);
    item
}

pub fn fighter(game: &Game, entity: Entity) -> Fighter {
    (*game.world().get::<&Fighter>(entity).unwrap()).clone()
}
