//! Encounter spawning
//!
//! Depth-scaled step tables and weighted random selection of what to place
//! in each room.

use rand::Rng;

use super::items::{spawn_item, ItemKind};
use super::monsters::{spawn_monster, MonsterKind};
use crate::ecs::Position;
use crate::ecs::ai::is_blocked;
use crate::game::Game;
use crate::world::Rect;

/// `(value, min_depth)` steps, sorted by `min_depth`
pub type StepTable = &'static [(u32, u32)];

pub const MAX_MONSTERS: StepTable = &[(2, 1), (3, 4), (5, 6)];
pub const MAX_ITEMS: StepTable = &[(1, 1), (2, 4)];

pub const MONSTER_CHANCES: &[(MonsterKind, StepTable)] = &[
    (MonsterKind::Orc, &[(80, 1)]),
    (MonsterKind::Troll, &[(15, 3), (30, 5), (60, 7)]),
    (MonsterKind::LostSoul, &[(10, 1)]),
];

pub const ITEM_CHANCES: &[(ItemKind, StepTable)] = &[
    (ItemKind::HealingPotion, &[(35, 1)]),
    (ItemKind::ManaPotion, &[(25, 1)]),
    (ItemKind::LightningScroll, &[(25, 4)]),
    (ItemKind::FireballScroll, &[(25, 6)]),
    (ItemKind::ConfusionScroll, &[(10, 2)]),
    (ItemKind::Sword, &[(5, 4)]),
    (ItemKind::Shield, &[(15, 8)]),
    (ItemKind::Helmet, &[(10, 2)]),
    (ItemKind::Amulet, &[(10, 3)]),
];

/// Value of the last step whose minimum depth has been reached, else 0
pub fn from_dungeon_level(table: &[(u32, u32)], depth: u32) -> u32 {
    table
        .iter()
        .rev()
        .find(|&&(_, min_depth)| depth >= min_depth)
        .map_or(0, |&(value, _)| value)
}

/// Index chosen with probability proportional to its weight. Draws in
/// `1..=sum` and takes the first running total that reaches the draw.
/// `None` when every weight is zero.
pub fn random_choice_index<R: Rng + ?Sized>(rng: &mut R, chances: &[u32]) -> Option<usize> {
    let total: u32 = chances.iter().sum();
    if total == 0 {
        return None;
    }
    let dice = rng.gen_range(1..=total);
    let mut running = 0;
    for (i, &weight) in chances.iter().enumerate() {
        running += weight;
        if dice <= running {
            return Some(i);
        }
    }
    None
}

/// Weighted choice over `(candidate, weight)` pairs
pub fn random_choice<'a, T, R: Rng + ?Sized>(rng: &mut R, choices: &'a [(T, u32)]) -> Option<&'a T> {
    let weights: Vec<u32> = choices.iter().map(|(_, w)| *w).collect();
    random_choice_index(rng, &weights).map(|i| &choices[i].0)
}

/// Resolve a chance table at a depth
fn weights_at<T: Copy>(table: &[(T, StepTable)], depth: u32) -> Vec<(T, u32)> {
    table
        .iter()
        .map(|&(kind, steps)| (kind, from_dungeon_level(steps, depth)))
        .collect()
}

/// One random interior tile of a room
fn random_spot<R: Rng + ?Sized>(rng: &mut R, room: &Rect) -> Position {
    Position::new(
        rng.gen_range(room.x1 + 1..=room.x2 - 1),
        rng.gen_range(room.y1 + 1..=room.y2 - 1),
    )
}

/// Place monsters and items in a room. A spawn whose tile is taken is
/// dropped, not retried.
pub fn populate_room(game: &mut Game, room: &Rect) {
    let depth = game.depth;

    let monster_weights = weights_at(MONSTER_CHANCES, depth);
    let max_monsters = from_dungeon_level(MAX_MONSTERS, depth);
    let count = game.rng.gen_range(0..=max_monsters);
    for _ in 0..count {
        let pos = random_spot(&mut game.rng, room);
        if is_blocked(game, pos.x, pos.y) {
            continue;
        }
        if let Some(&kind) = random_choice(&mut game.rng, &monster_weights) {
            let monster = spawn_monster(&mut game.world, kind, pos);
            game.add_object(monster);
        }
    }

    let item_weights = weights_at(ITEM_CHANCES, depth);
    let max_items = from_dungeon_level(MAX_ITEMS, depth);
    let count = game.rng.gen_range(0..=max_items);
    for _ in 0..count {
        let pos = random_spot(&mut game.rng, room);
        if is_blocked(game, pos.x, pos.y) {
            continue;
        }
        if let Some(&kind) = random_choice(&mut game.rng, &item_weights) {
            let item = spawn_item(&mut game.world, kind, Some(pos));
            game.add_object(item);
            game.send_to_back(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_step_table_lookup() {
        assert_eq!(from_dungeon_level(MAX_MONSTERS, 1), 2);
        assert_eq!(from_dungeon_level(MAX_MONSTERS, 3), 2);
        assert_eq!(from_dungeon_level(MAX_MONSTERS, 4), 3);
        assert_eq!(from_dungeon_level(MAX_MONSTERS, 10), 5);
        // Below the first threshold
        assert_eq!(from_dungeon_level(&[(15, 3)], 2), 0);
    }

    #[test]
    fn test_zero_weight_never_chosen() {
        let mut rng = StdRng::seed_from_u64(99);
        let choices = [("orc", 80), ("troll", 0)];
        for _ in 0..1000 {
            assert_eq!(random_choice(&mut rng, &choices), Some(&"orc"));
        }
    }

    #[test]
    fn test_all_zero_weights() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_choice_index(&mut rng, &[0, 0]), None);
        assert_eq!(random_choice_index(&mut rng, &[]), None);
    }

    #[test]
    fn test_weights_roughly_respected() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut hits = [0u32; 2];
        for _ in 0..10_000 {
            hits[random_choice_index(&mut rng, &[1, 3]).unwrap()] += 1;
        }
        assert!(hits[1] > hits[0] * 2, "{hits:?}");
    }

    #[test]
    fn test_trolls_appear_with_depth() {
        let shallow = weights_at(MONSTER_CHANCES, 1);
        let deep = weights_at(MONSTER_CHANCES, 7);
        assert_eq!(shallow[1], (MonsterKind::Troll, 0));
        assert_eq!(deep[1], (MonsterKind::Troll, 60));
    }

    #[test]
    fn test_populate_room_respects_bounds_and_blocking() {
        let mut game = crate::game::testing::arena();
        game.depth = 8;
        let room = Rect::new(2, 2, 8, 8);
        for _ in 0..10 {
            populate_room(&mut game, &room);
        }
        let mut occupied = std::collections::HashSet::new();
        for &e in game.objects() {
            if e == game.player() {
                continue;
            }
            let pos = game.position_of(e).unwrap();
            assert!(room.contains_interior(pos), "{pos:?} outside room");
            if game.world().get::<&crate::ecs::BlocksMovement>(e).is_ok() {
                assert!(occupied.insert(pos), "two blockers on {pos:?}");
            }
        }
    }
}
