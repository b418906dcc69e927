//! Room and corridor generator
//!
//! Random non-overlapping rectangles, each joined to the previous one by an
//! L-shaped corridor.

use rand::rngs::StdRng;
use rand::Rng;

use super::{DungeonParams, GeneratedDungeon, GenerationError};
use crate::world::{Map, Rect};

/// Generate a level layout.
///
/// Every attempt picks a size in `room_min_size..=room_max_size` and a
/// position that keeps the room inside the map. Rooms overlapping (or
/// touching) an accepted room are discarded. Fails when no room fits.
pub fn generate_dungeon(
    rng: &mut StdRng,
    params: &DungeonParams,
) -> Result<GeneratedDungeon, GenerationError> {
    let DungeonParams {
        width,
        height,
        max_rooms,
        room_min_size,
        room_max_size,
    } = *params;

    if room_min_size < 2 || room_min_size > room_max_size || room_max_size + 1 > width.min(height) {
        return Err(GenerationError::InvalidRoomSize {
            min: room_min_size,
            max: room_max_size,
            width,
            height,
        });
    }

    let mut map = Map::new(width, height);
    let mut rooms: Vec<Rect> = Vec::new();

    for _ in 0..max_rooms {
        let w = rng.gen_range(room_min_size..=room_max_size);
        let h = rng.gen_range(room_min_size..=room_max_size);
        let x = rng.gen_range(0..=width - w - 1);
        let y = rng.gen_range(0..=height - h - 1);
        let room = Rect::new(x, y, w, h);

        if rooms.iter().any(|other| room.intersects(other)) {
            continue;
        }

        map.carve_room(&room);

        if let Some(prev) = rooms.last() {
            let from = prev.center();
            let to = room.center();
            if rng.gen_bool(0.5) {
                map.carve_h_tunnel(from.x, to.x, from.y);
                map.carve_v_tunnel(from.y, to.y, to.x);
            } else {
                map.carve_v_tunnel(from.y, to.y, from.x);
                map.carve_h_tunnel(from.x, to.x, to.y);
            }
        }

        rooms.push(room);
    }

    if rooms.is_empty() {
        return Err(GenerationError::NoRooms {
            width,
            height,
            attempts: max_rooms,
        });
    }

    log::debug!("Generated {} rooms from {} attempts", rooms.len(), max_rooms);
    Ok(GeneratedDungeon { map, rooms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Position;
    use rand::SeedableRng;
    use std::collections::{HashSet, VecDeque};

    fn reachable_from(map: &Map, start: Position) -> HashSet<(i32, i32)> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([(start.x, start.y)]);
        seen.insert((start.x, start.y));
        while let Some((x, y)) = queue.pop_front() {
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let next = (x + dx, y + dy);
                if !map.is_blocked(next.0, next.1) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    #[test]
    fn test_rooms_never_overlap() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let dungeon = generate_dungeon(&mut rng, &DungeonParams::default()).unwrap();
            for (i, a) in dungeon.rooms.iter().enumerate() {
                for b in &dungeon.rooms[i + 1..] {
                    assert!(!a.intersects(b), "seed {seed}: {a:?} overlaps {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_rooms_inside_bounds() {
        let params = DungeonParams::default();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let dungeon = generate_dungeon(&mut rng, &params).unwrap();
            for room in &dungeon.rooms {
                assert!(room.x1 >= 0 && room.y1 >= 0);
                assert!(room.x2 < params.width && room.y2 < params.height);
            }
        }
    }

    #[test]
    fn test_all_room_centers_reachable() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let dungeon = generate_dungeon(&mut rng, &DungeonParams::default()).unwrap();
            let reachable = reachable_from(&dungeon.map, dungeon.first_center());
            for room in &dungeon.rooms {
                let c = room.center();
                assert!(reachable.contains(&(c.x, c.y)), "seed {seed}: {c:?} unreachable");
            }
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let params = DungeonParams::default();
        let a = generate_dungeon(&mut StdRng::seed_from_u64(7), &params).unwrap();
        let b = generate_dungeon(&mut StdRng::seed_from_u64(7), &params).unwrap();
        assert_eq!(a.rooms, b.rooms);
        assert_eq!(a.map, b.map);
    }

    #[test]
    fn test_zero_attempts_is_an_error() {
        let params = DungeonParams {
            max_rooms: 0,
            ..DungeonParams::default()
        };
        let result = generate_dungeon(&mut StdRng::seed_from_u64(1), &params);
        assert_eq!(
            result.unwrap_err(),
            GenerationError::NoRooms {
                width: 80,
                height: 43,
                attempts: 0
            }
        );
    }

    #[test]
    fn test_oversized_rooms_rejected() {
        let params = DungeonParams {
            width: 8,
            height: 8,
            room_min_size: 6,
            room_max_size: 10,
            max_rooms: 5,
        };
        let result = generate_dungeon(&mut StdRng::seed_from_u64(1), &params);
        assert!(matches!(result, Err(GenerationError::InvalidRoomSize { .. })));
    }

    #[test]
    fn test_centers_are_floor() {
        let mut rng = StdRng::seed_from_u64(3);
        let dungeon = generate_dungeon(&mut rng, &DungeonParams::default()).unwrap();
        let first = dungeon.first_center();
        let last = dungeon.last_center();
        assert!(!dungeon.map.is_blocked(first.x, first.y));
        assert!(!dungeon.map.is_blocked(last.x, last.y));
    }
}
