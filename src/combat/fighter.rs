//! Fighter operations
//!
//! Attacks, damage, healing and mana. Health and mana stay within
//! `0..=max` after every call.

use hecs::{Entity, World};

use super::death;
use super::stats::effective_stats;
use super::TurnOutcome;
use crate::colors;
use crate::ecs::{Fighter, ManalessCallback, Renderable};
use crate::game::messages::capitalize;
use crate::game::Game;

/// Melee attack: damage is attacker power minus target defense
pub fn attack(game: &mut Game, attacker: Entity, target: Entity) -> TurnOutcome {
    let (Some(offense), Some(guard)) = (
        effective_stats(&game.world, attacker),
        effective_stats(&game.world, target),
    ) else {
        return TurnOutcome::Continue;
    };

    let damage = offense.power - guard.defense;
    let attacker_name = capitalize(&game.name_of(attacker));
    let target_name = game.name_of(target);

    if damage > 0 {
        game.message(
            format!("{attacker_name} attacks {target_name} for {damage} hit points."),
            colors::WHITE,
        );
        take_damage(game, target, damage)
    } else {
        game.message(
            format!("{attacker_name} attacks {target_name} but it has no effect!"),
            colors::WHITE,
        );
        TurnOutcome::Continue
    }
}

/// Apply damage. Death fires only on the hit that takes hp from above zero
/// to zero; killing a non-player awards its xp to the player.
pub fn take_damage(game: &mut Game, target: Entity, amount: i32) -> TurnOutcome {
    if amount <= 0 {
        return TurnOutcome::Continue;
    }

    let (died, reward, on_death) = {
        let Ok(mut fighter) = game.world.get::<&mut Fighter>(target) else {
            return TurnOutcome::Continue;
        };
        if !fighter.is_alive() {
            return TurnOutcome::Continue;
        }
        fighter.hp = (fighter.hp - amount).max(0);
        (fighter.hp == 0, fighter.xp, fighter.on_death)
    };

    if !died {
        return TurnOutcome::Continue;
    }

    let outcome = death::die(game, target, on_death);
    let player = game.player;
    if target != player {
        if let Ok(mut fighter) = game.world.get::<&mut Fighter>(player) {
            fighter.xp += reward;
        }
    }
    outcome
}

/// Restore hit points, capped at effective max hp
pub fn heal(world: &mut World, entity: Entity, amount: i32) {
    let Some(stats) = effective_stats(world, entity) else {
        return;
    };
    if let Ok(mut fighter) = world.get::<&mut Fighter>(entity) {
        fighter.hp = (fighter.hp + amount.max(0)).min(stats.max_hp);
    }
}

/// Restore mana, capped at effective max mp
pub fn mana_buff(world: &mut World, entity: Entity, amount: i32) {
    let Some(stats) = effective_stats(world, entity) else {
        return;
    };
    let restored = {
        let Ok(mut fighter) = world.get::<&mut Fighter>(entity) else {
            return;
        };
        fighter.mp = (fighter.mp + amount.max(0)).min(stats.max_mp);
        (fighter.mp > 0).then_some(fighter.on_manaless)
    };
    // Undo the greyed-out look once mana is back
    if restored == Some(ManalessCallback::Player) {
        if let Ok(mut render) = world.get::<&mut Renderable>(entity) {
            if render.color == colors::LIGHTEST_GRAY {
                render.color = colors::WHITE;
            }
        }
    }
}

/// Spend mana, flooring at zero. Draining to exactly zero fires the
/// entity's manaless hook.
pub fn mana_decrease(world: &mut World, entity: Entity, amount: i32) {
    if amount <= 0 {
        return;
    }
    let drained = {
        let Ok(mut fighter) = world.get::<&mut Fighter>(entity) else {
            return;
        };
        fighter.mp = (fighter.mp - amount).max(0);
        (fighter.mp == 0).then_some(fighter.on_manaless)
    };
    if drained == Some(ManalessCallback::Player) {
        if let Ok(mut render) = world.get::<&mut Renderable>(entity) {
            render.color = colors::LIGHTEST_GRAY;
        }
    }
}

/// Pull hp and mp back under their effective maxima, e.g. after a bonus
/// item comes off
pub fn clamp_to_max(world: &mut World, entity: Entity) {
    let Some(stats) = effective_stats(world, entity) else {
        return;
    };
    if let Ok(mut fighter) = world.get::<&mut Fighter>(entity) {
        fighter.hp = fighter.hp.min(stats.max_hp.max(0));
        fighter.mp = fighter.mp.min(stats.max_mp.max(0));
    }
}
