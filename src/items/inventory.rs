//! Inventory system
//!
//! Moving items between the map and the player's pack.

use hecs::{Entity, World};

use super::equipment::{dequip, equip};
use crate::colors;
use crate::ecs::{EquipSlot, Equipment, Inventory, Item, Position};
use crate::game::Game;

/// Items the owner is currently wearing, in inventory order
pub fn all_equipped(world: &World, owner: Entity) -> Vec<Entity> {
    let Ok(inventory) = world.get::<&Inventory>(owner) else {
        return Vec::new();
    };
    inventory
        .items
        .iter()
        .copied()
        .filter(|&item| world.get::<&Equipment>(item).map_or(false, |eq| eq.is_equipped))
        .collect()
}

/// The item worn in a slot, if any
pub fn equipped_in_slot(world: &World, owner: Entity, slot: EquipSlot) -> Option<Entity> {
    all_equipped(world, owner)
        .into_iter()
        .find(|&item| world.get::<&Equipment>(item).map_or(false, |eq| eq.slot == slot))
}

/// Topmost item lying on a tile
pub fn item_at(game: &Game, pos: Position) -> Option<Entity> {
    game.objects
        .iter()
        .rev()
        .copied()
        .find(|&e| game.world.get::<&Item>(e).is_ok() && game.position_of(e) == Some(pos))
}

/// Move an item from the map into the player's pack, wearing it if its
/// slot is free. Returns false when the pack is full.
pub fn pick_up(game: &mut Game, item: Entity) -> bool {
    let player = game.player;
    let name = game.name_of(item);
    let capacity = game.config.inventory_capacity;

    let full = game
        .world
        .get::<&Inventory>(player)
        .map_or(true, |inv| inv.items.len() >= capacity);
    if full {
        game.message(format!("Your inventory is full, cannot pick up {name}."), colors::RED);
        return false;
    }

    let _ = game.world.remove_one::<Position>(item);
    game.remove_object(item);
    if let Ok(mut inventory) = game.world.get::<&mut Inventory>(player) {
        inventory.items.push(item);
    }
    game.message(format!("You picked up a {name}!"), colors::GREEN);

    let slot = game.world.get::<&Equipment>(item).ok().map(|eq| eq.slot);
    if let Some(slot) = slot {
        if equipped_in_slot(&game.world, player, slot).is_none() {
            equip(game, item);
        }
    }
    true
}

/// Take an item off (if worn) and leave it at the player's feet
pub fn drop_item(game: &mut Game, item: Entity) -> bool {
    let player = game.player;
    let carried = game
        .world
        .get::<&Inventory>(player)
        .map_or(false, |inv| inv.items.contains(&item));
    if !carried {
        return false;
    }

    dequip(game, item);
    if let Ok(mut inventory) = game.world.get::<&mut Inventory>(player) {
        inventory.items.retain(|&e| e != item);
    }
    let pos = game.player_pos();
    let _ = game.world.insert_one(item, pos);
    game.add_object(item);

    let name = game.name_of(item);
    game.message(format!("You dropped a {name}."), colors::YELLOW);
    true
}
