//! Target selection rules
//!
//! Item use can ask for a target; the turn scheduler then feeds clicked
//! tiles through [`resolve_target`] until one is accepted or the player
//! cancels.

use hecs::Entity;

use crate::ecs::{Fighter, Position};
use crate::game::Game;

/// What an effect needs picked
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetRequest {
    /// A visible monster within range of the player
    Monster { range: f64 },
    /// Any visible tile, optionally within range of the player
    Tile { range: Option<f64> },
}

/// An accepted selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Monster(Entity),
    Tile(Position),
}

/// Check a clicked tile against a request. `None` means keep waiting.
pub fn resolve_target(game: &Game, request: TargetRequest, pos: Position) -> Option<Target> {
    if !game.map.is_visible(pos.x, pos.y) {
        return None;
    }
    let from_player = game.player_pos().distance_to(&pos);

    match request {
        TargetRequest::Tile { range } => match range {
            Some(range) if from_player > range => None,
            _ => Some(Target::Tile(pos)),
        },
        TargetRequest::Monster { range } => {
            if from_player > range {
                return None;
            }
            monster_at(game, pos).map(Target::Monster)
        }
    }
}

/// A living non-player fighter standing on a tile
pub fn monster_at(game: &Game, pos: Position) -> Option<Entity> {
    game.objects.iter().copied().find(|&e| {
        e != game.player
            && game.world.get::<&Fighter>(e).is_ok()
            && game.position_of(e) == Some(pos)
    })
}

/// Nearest visible monster within range of the player
pub fn closest_monster(game: &Game, range: f64) -> Option<Entity> {
    let origin = game.player_pos();
    let mut best: Option<(Entity, f64)> = None;
    for &entity in &game.objects {
        if entity == game.player || game.world.get::<&Fighter>(entity).is_err() {
            continue;
        }
        let Some(pos) = game.position_of(entity) else {
            continue;
        };
        if !game.map.is_visible(pos.x, pos.y) {
            continue;
        }
        let dist = origin.distance_to(&pos);
        if dist <= range && best.map_or(true, |(_, d)| dist < d) {
            best = Some((entity, dist));
        }
    }
    best.map(|(entity, _)| entity)
}
