//! Item effects
//!
//! Spells cast by consumables. Casting is two-phase for effects that need a
//! target: [`cast`] may answer [`Cast::NeedsTarget`], and the caller later
//! finishes with [`cast_at`]. Mana is spent only once an effect lands.

use hecs::Entity;

use super::targeting::{closest_monster, Target, TargetRequest};
use crate::colors;
use crate::combat::{self, effective_stats, TurnOutcome};
use crate::ecs::{Ai, Fighter, ItemEffect, Position};
use crate::game::Game;

/// Result of trying to cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cast {
    /// The effect happened; the item is used up
    Done(TurnOutcome),
    /// Nothing happened; the item is kept
    Cancelled,
    /// Waiting on the player to pick a target
    NeedsTarget(TargetRequest),
}

/// First phase: apply the effect or ask for a target
pub fn cast(game: &mut Game, effect: ItemEffect) -> Cast {
    match effect {
        ItemEffect::Heal => cast_heal(game),
        ItemEffect::RestoreMana => cast_restore_mana(game),
        ItemEffect::Lightning => cast_lightning(game),
        ItemEffect::Confuse => {
            game.message(
                "Left-click an enemy to confuse it, or right-click to cancel.",
                colors::LIGHT_CYAN,
            );
            Cast::NeedsTarget(TargetRequest::Monster {
                range: game.config.spells.confuse_range,
            })
        }
        ItemEffect::Fireball => {
            game.message(
                "Left-click a target tile for the fireball, or right-click to cancel.",
                colors::LIGHT_CYAN,
            );
            Cast::NeedsTarget(TargetRequest::Tile { range: None })
        }
    }
}

/// Second phase: apply a targeted effect to an accepted target
pub fn cast_at(game: &mut Game, effect: ItemEffect, target: Target) -> Cast {
    match (effect, target) {
        (ItemEffect::Confuse, Target::Monster(monster)) => cast_confuse(game, monster),
        (ItemEffect::Fireball, Target::Tile(pos)) => cast_fireball(game, pos),
        (effect, _) => cast(game, effect),
    }
}

fn spend_mana(game: &mut Game, cost: i32) {
    let player = game.player;
    combat::mana_decrease(&mut game.world, player, cost);
}

fn player_vitals(game: &Game) -> Option<(Fighter, combat::EffectiveStats)> {
    let fighter = (*game.world.get::<&Fighter>(game.player).ok()?).clone();
    let stats = effective_stats(&game.world, game.player)?;
    Some((fighter, stats))
}

fn cast_heal(game: &mut Game) -> Cast {
    let Some((fighter, stats)) = player_vitals(game) else {
        return Cast::Cancelled;
    };
    if fighter.hp >= stats.max_hp {
        game.message("You are already at full health.", colors::RED);
        return Cast::Cancelled;
    }
    game.message("Your wounds start to feel better!", colors::LIGHT_VIOLET);
    let (player, amount, cost) = (game.player, game.config.spells.heal_amount, game.config.spells.heal_cost);
    combat::heal(&mut game.world, player, amount);
    spend_mana(game, cost);
    Cast::Done(TurnOutcome::Continue)
}

fn cast_restore_mana(game: &mut Game) -> Cast {
    let Some((fighter, stats)) = player_vitals(game) else {
        return Cast::Cancelled;
    };
    if fighter.mp >= stats.max_mp {
        game.message("You are already at full mana.", colors::RED);
        return Cast::Cancelled;
    }
    game.message("Your magic feels a bit refreshed!", colors::LIGHT_VIOLET);
    let (player, amount, cost) = (game.player, game.config.spells.mana_amount, game.config.spells.mana_cost);
    combat::mana_buff(&mut game.world, player, amount);
    spend_mana(game, cost);
    Cast::Done(TurnOutcome::Continue)
}

fn cast_lightning(game: &mut Game) -> Cast {
    let spells = game.config.spells.clone();
    let Some(monster) = closest_monster(game, spells.lightning_range) else {
        game.message("No enemy is close enough to strike.", colors::RED);
        return Cast::Cancelled;
    };
    let name = game.name_of(monster);
    game.message(
        format!(
            "A lightning bolt strikes the {name} with a loud thunder! The damage is {} hit points.",
            spells.lightning_damage
        ),
        colors::LIGHT_BLUE,
    );
    let outcome = combat::take_damage(game, monster, spells.lightning_damage);
    spend_mana(game, spells.lightning_cost);
    Cast::Done(outcome)
}

fn cast_confuse(game: &mut Game, monster: Entity) -> Cast {
    let spells = game.config.spells.clone();
    let current = game.world.get::<&Ai>(monster).ok().map(|ai| (*ai).clone());
    let Some(current) = current else {
        game.message("Nothing happens.", colors::LIGHT_GRAY);
        return Cast::Cancelled;
    };
    let _ = game.world.insert_one(monster, current.confused(spells.confuse_turns));

    let name = game.name_of(monster);
    game.message(
        format!("The eyes of the {name} look vacant, as it starts to stumble around!"),
        colors::LIGHT_GREEN,
    );
    log::debug!("Confused {name} for {} turns", spells.confuse_turns);
    spend_mana(game, spells.confuse_cost);
    Cast::Done(TurnOutcome::Continue)
}

fn cast_fireball(game: &mut Game, center: Position) -> Cast {
    let spells = game.config.spells.clone();
    game.message(
        format!(
            "The fireball explodes, burning everything within {} tiles!",
            spells.fireball_radius
        ),
        colors::ORANGE,
    );

    // Collect first: burning can reorder the draw list
    let victims: Vec<Entity> = game
        .objects
        .iter()
        .copied()
        .filter(|&e| game.world.get::<&Fighter>(e).is_ok())
        .filter(|&e| {
            game.position_of(e)
                .map_or(false, |p| p.distance_to(&center) <= spells.fireball_radius)
        })
        .collect();

    let mut outcome = TurnOutcome::Continue;
    for victim in victims {
        let name = game.name_of(victim);
        game.message(
            format!("The {name} gets burned for {} hit points.", spells.fireball_damage),
            colors::ORANGE,
        );
        outcome = outcome.merge(combat::take_damage(game, victim, spells.fireball_damage));
    }
    spend_mana(game, spells.fireball_cost);
    Cast::Done(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{spawn_monster, MonsterKind};
    use crate::game::testing::arena;

    fn vitals(game: &Game) -> (i32, i32) {
        let f = game.world.get::<&Fighter>(game.player).unwrap();
        (f.hp, f.mp)
    }

    #[test]
    fn test_heal_costs_one_mana() {
        let mut game = arena();
        game.world.get::<&mut Fighter>(game.player).unwrap().hp = 15;
        assert_eq!(cast(&mut game, ItemEffect::Heal), Cast::Done(TurnOutcome::Continue));
        assert_eq!(vitals(&game), (25, 29));
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut game = arena();
        game.world.get::<&mut Fighter>(game.player).unwrap().hp = 27;
        let _ = cast(&mut game, ItemEffect::Heal);
        assert_eq!(vitals(&game), (30, 29));
    }

    #[test]
    fn test_heal_at_full_health_cancels() {
        let mut game = arena();
        assert_eq!(cast(&mut game, ItemEffect::Heal), Cast::Cancelled);
        assert_eq!(vitals(&game), (30, 30));
    }

    #[test]
    fn test_restore_mana_at_full_cancels() {
        let mut game = arena();
        assert_eq!(cast(&mut game, ItemEffect::RestoreMana), Cast::Cancelled);
        game.world.get::<&mut Fighter>(game.player).unwrap().mp = 4;
        assert_eq!(cast(&mut game, ItemEffect::RestoreMana), Cast::Done(TurnOutcome::Continue));
        assert_eq!(vitals(&game).1, 14);
    }

    #[test]
    fn test_lightning_without_target_cancels() {
        let mut game = arena();
        assert_eq!(cast(&mut game, ItemEffect::Lightning), Cast::Cancelled);
        assert_eq!(vitals(&game), (30, 30));
    }

    #[test]
    fn test_lightning_kills_nearest() {
        let mut game = arena();
        let troll = spawn_monster(&mut game.world, MonsterKind::Troll, Position::new(7, 5));
        game.add_object(troll);
        assert_eq!(cast(&mut game, ItemEffect::Lightning), Cast::Done(TurnOutcome::Continue));
        assert!(game.world.get::<&Fighter>(troll).is_err());
        assert_eq!(game.world.get::<&Fighter>(game.player).unwrap().xp, 100);
        assert_eq!(vitals(&game).1, 27);
    }

    #[test]
    fn test_targeted_spells_cost_nothing_until_resolved() {
        let mut game = arena();
        assert!(matches!(cast(&mut game, ItemEffect::Confuse), Cast::NeedsTarget(TargetRequest::Monster { .. })));
        assert!(matches!(cast(&mut game, ItemEffect::Fireball), Cast::NeedsTarget(TargetRequest::Tile { .. })));
        assert_eq!(vitals(&game), (30, 30));
    }

    #[test]
    fn test_confuse_wraps_previous_ai() {
        let mut game = arena();
        let orc = spawn_monster(&mut game.world, MonsterKind::Orc, Position::new(8, 8));
        game.add_object(orc);
        let _ = cast_at(&mut game, ItemEffect::Confuse, Target::Monster(orc));
        assert_eq!(
            *game.world.get::<&Ai>(orc).unwrap(),
            Ai::Confused { previous: Box::new(Ai::Aggressive), turns_left: 10 }
        );
        assert_eq!(vitals(&game).1, 22);
    }

    #[test]
    fn test_confuse_on_remains_does_nothing() {
        let mut game = arena();
        let orc = spawn_monster(&mut game.world, MonsterKind::Orc, Position::new(8, 8));
        game.add_object(orc);
        game.world.remove_one::<Ai>(orc).unwrap();

        assert_eq!(cast_at(&mut game, ItemEffect::Confuse, Target::Monster(orc)), Cast::Cancelled);
        assert!(game.world.get::<&Ai>(orc).is_err());
        assert_eq!(vitals(&game), (30, 30));
        assert_eq!(game.messages().last().unwrap().text, "Nothing happens.");
    }

    #[test]
    fn test_fireball_burns_player_too() {
        let mut game = arena();
        let orc = spawn_monster(&mut game.world, MonsterKind::Orc, Position::new(6, 5));
        let distant = spawn_monster(&mut game.world, MonsterKind::Orc, Position::new(15, 15));
        game.add_object(orc);
        game.add_object(distant);

        let result = cast_at(&mut game, ItemEffect::Fireball, Target::Tile(Position::new(6, 5)));
        assert_eq!(result, Cast::Done(TurnOutcome::Continue));
        assert!(game.world.get::<&Fighter>(orc).is_err(), "orc burned to death");
        assert_eq!(game.world.get::<&Fighter>(distant).unwrap().hp, 10);
        assert_eq!(vitals(&game), (18, 25));
    }

    #[test]
    fn test_fireball_can_kill_player() {
        let mut game = arena();
        game.world.get::<&mut Fighter>(game.player).unwrap().hp = 5;
        let result = cast_at(&mut game, ItemEffect::Fireball, Target::Tile(Position::new(5, 5)));
        assert_eq!(result, Cast::Done(TurnOutcome::PlayerDied));
    }
}
