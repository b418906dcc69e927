//! Death transitions

use hecs::Entity;

use super::TurnOutcome;
use crate::colors;
use crate::ecs::{Ai, BlocksMovement, DeathCallback, Fighter, Name, Renderable};
use crate::game::messages::capitalize;
use crate::game::Game;

pub fn die(game: &mut Game, entity: Entity, callback: DeathCallback) -> TurnOutcome {
    match callback {
        DeathCallback::Player => player_death(game, entity),
        DeathCallback::Monster => monster_death(game, entity),
    }
}

/// Turn the player into a corpse. The fighter stays attached for inspection.
pub fn player_death(game: &mut Game, player: Entity) -> TurnOutcome {
    game.message("You died!", colors::RED);
    if let Ok(mut render) = game.world.get::<&mut Renderable>(player) {
        render.glyph = '%';
        render.color = colors::DARK_RED;
    }
    log::info!("Player died on depth {}", game.depth);
    TurnOutcome::PlayerDied
}

/// Turn a monster into a non-blocking corpse drawn under everything else
pub fn monster_death(game: &mut Game, monster: Entity) -> TurnOutcome {
    let name = game.name_of(monster);
    let xp = game.world.get::<&Fighter>(monster).map_or(0, |f| f.xp);
    game.message(
        format!("The {} is dead! You gain {} experience points.", capitalize(&name), xp),
        colors::ORANGE,
    );

    if let Ok(mut render) = game.world.get::<&mut Renderable>(monster) {
        render.glyph = '%';
        render.color = colors::DARK_RED;
    }
    let _ = game.world.remove_one::<BlocksMovement>(monster);
    let _ = game.world.remove_one::<Fighter>(monster);
    let _ = game.world.remove_one::<Ai>(monster);
    let _ = game.world.insert_one(monster, Name(format!("remains of {name}")));
    game.send_to_back(monster);

    log::debug!("{name} died");
    TurnOutcome::Continue
}
