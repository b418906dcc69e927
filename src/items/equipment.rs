//! Equipment system
//!
//! Wearing and removing items. One worn item per slot.

use hecs::Entity;

use super::inventory::equipped_in_slot;
use crate::colors;
use crate::combat::clamp_to_max;
use crate::ecs::Equipment;
use crate::game::Game;

/// Wear an item, first removing whatever occupies its slot
pub fn equip(game: &mut Game, item: Entity) {
    let slot = match game.world.get::<&Equipment>(item) {
        Ok(eq) if !eq.is_equipped => eq.slot,
        _ => return,
    };
    let player = game.player;
    if let Some(current) = equipped_in_slot(&game.world, player, slot) {
        dequip(game, current);
    }
    if let Ok(mut eq) = game.world.get::<&mut Equipment>(item) {
        eq.is_equipped = true;
    }
    let name = game.name_of(item);
    game.message(format!("Equipped {name} on {}.", slot.name()), colors::LIGHT_GREEN);
}

/// Take an item off. No-op if it is not worn.
pub fn dequip(game: &mut Game, item: Entity) {
    let slot = match game.world.get::<&mut Equipment>(item) {
        Ok(mut eq) if eq.is_equipped => {
            eq.is_equipped = false;
            eq.slot
        }
        _ => return,
    };
    let player = game.player;
    clamp_to_max(&mut game.world, player);
    let name = game.name_of(item);
    game.message(format!("Dequipped {name} from {}.", slot.name()), colors::LIGHT_YELLOW);
}

/// Using a wearable toggles it
pub fn toggle_equip(game: &mut Game, item: Entity) {
    let equipped = game.world.get::<&Equipment>(item).map_or(false, |eq| eq.is_equipped);
    if equipped {
        dequip(game, item);
    } else {
        equip(game, item);
    }
}
