//! Monster catalogue

use hecs::{Entity, World};

use crate::colors::{self, Rgb};
use crate::ecs::{Ai, BlocksMovement, DeathCallback, Fighter, Name, Position, Renderable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonsterKind {
    Orc,
    Troll,
    /// Harmless wandering spirit
    LostSoul,
}

/// Static stats for a monster kind
#[derive(Debug, Clone, Copy)]
pub struct MonsterTemplate {
    pub name: &'static str,
    pub glyph: char,
    pub color: Rgb,
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
    pub xp: u32,
}

impl MonsterKind {
    pub fn template(self) -> MonsterTemplate {
        match self {
            MonsterKind::Orc => MonsterTemplate {
                name: "orc",
                glyph: 'o',
                color: colors::DESATURATED_GREEN,
                hp: 10,
                defense: 0,
                power: 3,
                xp: 35,
            },
            MonsterKind::Troll => MonsterTemplate {
                name: "troll",
                glyph: 'T',
                color: colors::DARKER_GREEN,
                hp: 16,
                defense: 1,
                power: 4,
                xp: 100,
            },
            MonsterKind::LostSoul => MonsterTemplate {
                name: "lost soul",
                glyph: 's',
                color: colors::PALE_SPIRIT,
                hp: 4,
                defense: 0,
                power: 0,
                xp: 5,
            },
        }
    }

    pub fn ai(self) -> Ai {
        match self {
            MonsterKind::Orc | MonsterKind::Troll => Ai::Aggressive,
            MonsterKind::LostSoul => Ai::Wanderer,
        }
    }
}

/// Spawn a monster on the map. The caller adds it to the draw order.
pub fn spawn_monster(world: &mut World, kind: MonsterKind, pos: Position) -> Entity {
    let t = kind.template();
    world.spawn((
        Name::new(t.name),
        pos,
        Renderable::new(t.glyph, t.color),
        BlocksMovement,
        Fighter::new(t.hp, 0, t.defense, t.power, t.xp, DeathCallback::Monster),
        kind.ai(),
    ))
}
