//! Item catalogue
//!
//! Consumables carry an effect; wearables carry an `Equipment` component and
//! no effect.

use hecs::{Entity, World};

use crate::colors::{self, Rgb};
use crate::ecs::{
    AlwaysVisible, EquipSlot, Equipment, Item, ItemEffect, Name, Position, Renderable,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    HealingPotion,
    ManaPotion,
    LightningScroll,
    FireballScroll,
    ConfusionScroll,
    Dagger,
    Sword,
    Shield,
    Helmet,
    Amulet,
}

impl ItemKind {
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::HealingPotion => "healing potion",
            ItemKind::ManaPotion => "mana potion",
            ItemKind::LightningScroll => "scroll of lightning bolt",
            ItemKind::FireballScroll => "scroll of fireball",
            ItemKind::ConfusionScroll => "scroll of confusion",
            ItemKind::Dagger => "dagger",
            ItemKind::Sword => "sword",
            ItemKind::Shield => "shield",
            ItemKind::Helmet => "helmet",
            ItemKind::Amulet => "amulet",
        }
    }

    fn appearance(self) -> (char, Rgb) {
        match self {
            ItemKind::HealingPotion => ('!', colors::VIOLET),
            ItemKind::ManaPotion => ('!', colors::AZURE),
            ItemKind::LightningScroll | ItemKind::FireballScroll | ItemKind::ConfusionScroll => {
                ('#', colors::LIGHT_YELLOW)
            }
            ItemKind::Dagger => ('-', colors::SKY),
            ItemKind::Sword => ('/', colors::SKY),
            ItemKind::Shield => ('[', colors::DARKER_ORANGE),
            ItemKind::Helmet => ('^', colors::DARKER_HAN),
            ItemKind::Amulet => ('"', colors::GOLD),
        }
    }

    pub fn effect(self) -> Option<ItemEffect> {
        match self {
            ItemKind::HealingPotion => Some(ItemEffect::Heal),
            ItemKind::ManaPotion => Some(ItemEffect::RestoreMana),
            ItemKind::LightningScroll => Some(ItemEffect::Lightning),
            ItemKind::FireballScroll => Some(ItemEffect::Fireball),
            ItemKind::ConfusionScroll => Some(ItemEffect::Confuse),
            _ => None,
        }
    }

    pub fn equipment(self) -> Option<Equipment> {
        match self {
            ItemKind::Dagger => Some(Equipment::new(EquipSlot::RightHand).with_power(2)),
            ItemKind::Sword => Some(Equipment::new(EquipSlot::RightHand).with_power(3)),
            ItemKind::Shield => Some(Equipment::new(EquipSlot::LeftHand).with_defense(1)),
            ItemKind::Helmet => Some(Equipment::new(EquipSlot::Head).with_max_hp(1)),
            ItemKind::Amulet => Some(Equipment::new(EquipSlot::Neck).with_max_mp(5)),
            _ => None,
        }
    }
}

/// Spawn an item. `None` position means it starts out carried.
pub fn spawn_item(world: &mut World, kind: ItemKind, pos: Option<Position>) -> Entity {
    let (glyph, color) = kind.appearance();
    let entity = world.spawn((
        Name::new(kind.name()),
        Renderable::new(glyph, color),
        Item { effect: kind.effect() },
        AlwaysVisible,
    ));
    if let Some(pos) = pos {
        let _ = world.insert_one(entity, pos);
    }
    if let Some(equipment) = kind.equipment() {
        let _ = world.insert_one(entity, equipment);
    }
    entity
}
