//! Effective combat stats
//!
//! Base fighter values plus the bonuses of every currently equipped item in
//! the owner's inventory. Always derived on read, never cached.

use hecs::{Entity, World};

use crate::ecs::{Equipment, Fighter, Inventory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EffectiveStats {
    pub power: i32,
    pub defense: i32,
    pub max_hp: i32,
    pub max_mp: i32,
}

/// Summed bonuses of the owner's equipped items
pub fn equipment_bonuses(world: &World, owner: Entity) -> EffectiveStats {
    let mut total = EffectiveStats::default();
    let Ok(inventory) = world.get::<&Inventory>(owner) else {
        return total;
    };
    for &item in &inventory.items {
        if let Ok(eq) = world.get::<&Equipment>(item) {
            if eq.is_equipped {
                total.power += eq.power_bonus;
                total.defense += eq.defense_bonus;
                total.max_hp += eq.max_hp_bonus;
                total.max_mp += eq.max_mp_bonus;
            }
        }
    }
    total
}

/// Effective stats of a fighter, or `None` if the entity cannot fight
pub fn effective_stats(world: &World, entity: Entity) -> Option<EffectiveStats> {
    let fighter = world.get::<&Fighter>(entity).ok()?;
    let bonus = equipment_bonuses(world, entity);
    Some(EffectiveStats {
        power: fighter.base_power + bonus.power,
        defense: fighter.base_defense + bonus.defense,
        max_hp: fighter.base_max_hp + bonus.max_hp,
        max_mp: fighter.base_max_mp + bonus.max_mp,
    })
}
