//! Monster AI systems
//!
//! One turn of behavior per AI-bearing entity, plus the shared movement
//! helpers the player also uses.

use hecs::Entity;
use rand::Rng;

use super::components::{Ai, BlocksMovement, Position};
use crate::colors;
use crate::combat::{self, TurnOutcome};
use crate::game::Game;

/// Whether a tile is a wall or occupied by a blocking entity
pub fn is_blocked(game: &Game, x: i32, y: i32) -> bool {
    if game.map.is_blocked(x, y) {
        return true;
    }
    game.world
        .query::<(&Position, &BlocksMovement)>()
        .iter()
        .any(|(_, (pos, _))| pos.x == x && pos.y == y)
}

/// Step by a delta if the destination is free. Returns whether it moved.
pub fn move_by(game: &mut Game, entity: Entity, dx: i32, dy: i32) -> bool {
    let Some(pos) = game.position_of(entity) else {
        return false;
    };
    let (x, y) = (pos.x + dx, pos.y + dy);
    if (dx == 0 && dy == 0) || is_blocked(game, x, y) {
        return false;
    }
    if let Ok(mut pos) = game.world.get::<&mut Position>(entity) {
        pos.x = x;
        pos.y = y;
    }
    true
}

/// Greedy single step toward a target: the direction vector is normalized,
/// then rounded to one of the eight neighbors
pub fn move_towards(game: &mut Game, entity: Entity, target: Position) -> bool {
    let Some(pos) = game.position_of(entity) else {
        return false;
    };
    let distance = pos.distance_to(&target);
    if distance == 0.0 {
        return false;
    }
    let dx = ((target.x - pos.x) as f64 / distance).round() as i32;
    let dy = ((target.y - pos.y) as f64 / distance).round() as i32;
    move_by(game, entity, dx, dy)
}

/// Run one turn for an entity's current AI
pub fn take_turn(game: &mut Game, entity: Entity) -> TurnOutcome {
    let ai = match game.world.get::<&Ai>(entity) {
        Ok(ai) => (*ai).clone(),
        Err(_) => return TurnOutcome::Continue,
    };

    match ai {
        Ai::Aggressive => aggressive_turn(game, entity),
        Ai::Wanderer => wanderer_turn(game, entity),
        Ai::Confused {
            previous,
            turns_left,
        } => confused_turn(game, entity, *previous, turns_left),
    }
}

/// Chase the player while in view; attack when adjacent
fn aggressive_turn(game: &mut Game, monster: Entity) -> TurnOutcome {
    let Some(pos) = game.position_of(monster) else {
        return TurnOutcome::Continue;
    };
    if !game.map.is_visible(pos.x, pos.y) {
        return TurnOutcome::Continue;
    }

    let player = game.player;
    let target = game.player_pos();
    if pos.distance_to(&target) >= 2.0 {
        move_towards(game, monster, target);
        TurnOutcome::Continue
    } else if game.player_alive() {
        combat::attack(game, monster, player)
    } else {
        TurnOutcome::Continue
    }
}

/// Drift toward the player while in view, never attack
fn wanderer_turn(game: &mut Game, npc: Entity) -> TurnOutcome {
    if let Some(pos) = game.position_of(npc) {
        if game.map.is_visible(pos.x, pos.y) {
            let target = game.player_pos();
            move_towards(game, npc, target);
        }
    }
    TurnOutcome::Continue
}

/// Stumble randomly, then revert to the wrapped behavior on the turn the
/// counter hits zero
fn confused_turn(game: &mut Game, monster: Entity, previous: Ai, mut turns_left: u32) -> TurnOutcome {
    if turns_left > 0 {
        let dx = game.rng.gen_range(-1..=1);
        let dy = game.rng.gen_range(-1..=1);
        move_by(game, monster, dx, dy);
        turns_left -= 1;
    }

    if turns_left == 0 {
        let name = game.name_of(monster);
        let _ = game.world.insert_one(monster, previous);
        game.message(format!("The {name} is no longer confused!"), colors::RED);
        log::debug!("{name} recovered from confusion");
    } else {
        let _ = game.world.insert_one(
            monster,
            Ai::Confused {
                previous: Box::new(previous),
                turns_left,
            },
        );
    }
    TurnOutcome::Continue
}
