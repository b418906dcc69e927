//! Player entity creation

use hecs::World;

use crate::colors;
use crate::ecs::{
    BlocksMovement, DeathCallback, Fighter, Inventory, Level, ManalessCallback, Name, Player,
    Position, Renderable,
};

/// Spawn the player with starting stats and an empty inventory
pub fn spawn_player(world: &mut World, pos: Position) -> hecs::Entity {
    world.spawn((
        Player,
        Name::new("player"),
        pos,
        Renderable::new('@', colors::WHITE),
        BlocksMovement,
        Fighter::new(30, 30, 2, 2, 0, DeathCallback::Player).with_manaless(ManalessCallback::Player),
        Inventory::default(),
        Level(1),
    ))
}
