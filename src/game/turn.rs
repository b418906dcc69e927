//! Turn scheduling
//!
//! One player action, then one step for every AI-bearing entity in draw
//! order, then the level-up check. Actions that take no time skip the
//! monsters entirely. Targeting and level-up are prompts: while one is
//! pending, normal actions are refused and input goes to the prompt.

use hecs::Entity;

use super::state::{Game, GameState};
use crate::colors;
use crate::combat::{self, TurnOutcome};
use crate::ecs::{self, Ai, Equipment, Fighter, Item, ItemEffect, Level, Position};
use crate::items::{self, effects, targeting, Cast, TargetRequest};
use crate::progression::{apply_level_up, LevelUpChoice};

/// A player command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// Step, or attack whatever fighter is in the way
    Move { dx: i32, dy: i32 },
    Wait,
    PickUp,
    /// Use the inventory item at an index
    UseItem(usize),
    /// Drop the inventory item at an index
    DropItem(usize),
}

/// Input answering a targeting prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetInput {
    Select(Position),
    Cancel,
}

/// A question the game is waiting on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Prompt {
    Targeting {
        item: Entity,
        effect: ItemEffect,
        request: TargetRequest,
    },
    LevelUp,
}

/// Whether the world advanced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    TookTurn,
    NoTurn,
}

impl Game {
    /// Resolve a player action and, if it took time, the monsters' turns
    pub fn perform(&mut self, action: PlayerAction) -> ActionResult {
        if self.state != GameState::Playing || self.prompt.is_some() {
            return ActionResult::NoTurn;
        }

        let (took_turn, outcome) = match action {
            PlayerAction::Move { dx, dy } => (true, self.move_or_attack(dx, dy)),
            PlayerAction::Wait => (true, TurnOutcome::Continue),
            PlayerAction::PickUp => (self.pick_up_here(), TurnOutcome::Continue),
            PlayerAction::UseItem(index) => match self.inventory().get(index).copied() {
                Some(item) => self.use_item(item),
                None => (false, TurnOutcome::Continue),
            },
            PlayerAction::DropItem(index) => match self.inventory().get(index).copied() {
                Some(item) => (items::drop_item(self, item), TurnOutcome::Continue),
                None => (false, TurnOutcome::Continue),
            },
        };
        self.finish_action(took_turn, outcome)
    }

    /// Answer a pending targeting prompt. Invalid picks keep it open.
    pub fn select_target(&mut self, input: TargetInput) -> ActionResult {
        let Some(Prompt::Targeting {
            item,
            effect,
            request,
        }) = self.prompt
        else {
            return ActionResult::NoTurn;
        };

        let pos = match input {
            TargetInput::Cancel => {
                self.prompt = None;
                self.message("Cancelled.", colors::LIGHT_GRAY);
                log::debug!("Targeting cancelled");
                return ActionResult::NoTurn;
            }
            TargetInput::Select(pos) => pos,
        };

        let Some(target) = targeting::resolve_target(self, request, pos) else {
            return ActionResult::NoTurn;
        };
        self.prompt = None;

        match effects::cast_at(self, effect, target) {
            Cast::Done(outcome) => {
                self.consume_item(item);
                self.finish_action(true, outcome)
            }
            Cast::Cancelled => ActionResult::NoTurn,
            Cast::NeedsTarget(request) => {
                self.prompt = Some(Prompt::Targeting {
                    item,
                    effect,
                    request,
                });
                ActionResult::NoTurn
            }
        }
    }

    /// Answer a pending level-up prompt
    pub fn choose_level_up(&mut self, choice: LevelUpChoice) -> bool {
        if !matches!(self.prompt, Some(Prompt::LevelUp)) {
            return false;
        }
        let player = self.player;
        apply_level_up(&mut self.world, player, choice);
        self.prompt = None;
        self.check_level_up();
        true
    }

    fn move_or_attack(&mut self, dx: i32, dy: i32) -> TurnOutcome {
        let player = self.player;
        let pos = self.player_pos();
        let dest = Position::new(pos.x + dx, pos.y + dy);

        match self.fighter_at(dest, Some(player)) {
            Some(target) => combat::attack(self, player, target),
            None => {
                if ecs::move_by(self, player, dx, dy) {
                    self.mark_fov_dirty();
                }
                TurnOutcome::Continue
            }
        }
    }

    fn pick_up_here(&mut self) -> bool {
        let pos = self.player_pos();
        match items::item_at(self, pos) {
            Some(item) => items::pick_up(self, item),
            None => {
                self.message("There is nothing here to pick up.", colors::LIGHT_GRAY);
                false
            }
        }
    }

    /// Wearables toggle; consumables cast and are used up unless cancelled
    fn use_item(&mut self, item: Entity) -> (bool, TurnOutcome) {
        if self.world.get::<&Equipment>(item).is_ok() {
            items::toggle_equip(self, item);
            return (true, TurnOutcome::Continue);
        }

        let effect = self.world.get::<&Item>(item).ok().and_then(|i| i.effect);
        let Some(effect) = effect else {
            let name = self.name_of(item);
            self.message(format!("The {name} cannot be used."), colors::LIGHT_GRAY);
            return (false, TurnOutcome::Continue);
        };

        match effects::cast(self, effect) {
            Cast::Done(outcome) => {
                self.consume_item(item);
                (true, outcome)
            }
            Cast::Cancelled => (false, TurnOutcome::Continue),
            Cast::NeedsTarget(request) => {
                log::debug!("Waiting for a target: {request:?}");
                self.prompt = Some(Prompt::Targeting {
                    item,
                    effect,
                    request,
                });
                (false, TurnOutcome::Continue)
            }
        }
    }

    /// Remove a used-up item from the pack and the world
    fn consume_item(&mut self, item: Entity) {
        let player = self.player;
        if let Ok(mut inventory) = self.world.get::<&mut crate::ecs::Inventory>(player) {
            inventory.items.retain(|&e| e != item);
        }
        let _ = self.world.despawn(item);
    }

    fn apply_outcome(&mut self, outcome: TurnOutcome) {
        if outcome.player_died() && self.state != GameState::Dead {
            self.state = GameState::Dead;
            self.prompt = None;
            log::debug!("State: Playing -> Dead");
        }
    }

    fn finish_action(&mut self, took_turn: bool, outcome: TurnOutcome) -> ActionResult {
        self.apply_outcome(outcome);
        self.refresh_fov();
        if !took_turn {
            return ActionResult::NoTurn;
        }
        self.run_monsters();
        self.check_level_up();
        ActionResult::TookTurn
    }

    /// Every AI-bearing entity acts once, in draw order
    fn run_monsters(&mut self) {
        let actors: Vec<Entity> = self.objects.clone();
        for entity in actors {
            if self.state != GameState::Playing {
                break;
            }
            if entity == self.player || self.world.get::<&Ai>(entity).is_err() {
                continue;
            }
            let outcome = ecs::take_turn(self, entity);
            self.apply_outcome(outcome);
        }
    }

    /// Level up once if the player has enough xp, leaving a prompt open
    fn check_level_up(&mut self) {
        if self.state != GameState::Playing || self.prompt.is_some() {
            return;
        }
        let level = self.player_level();
        let needed = self.config.level_up_xp(level);
        let player = self.player;

        let reached = match self.world.get::<&mut Fighter>(player) {
            Ok(mut fighter) if fighter.xp >= needed => {
                fighter.xp -= needed;
                true
            }
            _ => false,
        };
        if !reached {
            return;
        }

        if let Ok(mut lvl) = self.world.get::<&mut Level>(player) {
            lvl.0 += 1;
        }
        self.message(
            format!("Your battle skills grow stronger! You reached level {}!", level + 1),
            colors::YELLOW,
        );
        log::debug!("Player reached level {}", level + 1);
        self.prompt = Some(Prompt::LevelUp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Inventory;
    use crate::entities::{spawn_item, spawn_monster, ItemKind, MonsterKind};
    use crate::game::testing::arena;

    fn give(game: &mut Game, kind: ItemKind) -> Entity {
        let item = spawn_item(&mut game.world, kind, None);
        game.world.get::<&mut Inventory>(game.player).unwrap().items.push(item);
        item
    }

    /// One-tile corridor along y = 5 with the player at its west end
    fn corridor() -> Game {
        let mut map = crate::world::Map::new(12, 11);
        map.carve_h_tunnel(1, 10, 5);
        Game::with_map(crate::data::GameConfig::default(), map, Position::new(1, 5), 7)
    }

    #[test]
    fn test_monsters_act_in_draw_order() {
        let mut game = corridor();
        let front = spawn_monster(&mut game.world, MonsterKind::Orc, Position::new(4, 5));
        let back = spawn_monster(&mut game.world, MonsterKind::Orc, Position::new(5, 5));
        game.add_object(front);
        game.add_object(back);

        assert_eq!(game.perform(PlayerAction::Wait), ActionResult::TookTurn);
        assert_eq!(game.position_of(front), Some(Position::new(3, 5)));
        assert_eq!(game.position_of(back), Some(Position::new(4, 5)));
    }

    #[test]
    fn test_monster_blocked_by_one_yet_to_act() {
        let mut game = corridor();
        let front = spawn_monster(&mut game.world, MonsterKind::Orc, Position::new(4, 5));
        let back = spawn_monster(&mut game.world, MonsterKind::Orc, Position::new(5, 5));
        game.add_object(front);
        game.add_object(back);
        game.send_to_back(back);

        assert_eq!(game.perform(PlayerAction::Wait), ActionResult::TookTurn);
        assert_eq!(game.position_of(front), Some(Position::new(3, 5)));
        assert_eq!(game.position_of(back), Some(Position::new(5, 5)));
    }

    #[test]
    fn test_move_marks_view_and_runs_monsters() {
        let mut game = arena();
        let orc = spawn_monster(&mut game.world, MonsterKind::Orc, Position::new(10, 5));
        game.add_object(orc);

        assert_eq!(game.perform(PlayerAction::Move { dx: 1, dy: 0 }), ActionResult::TookTurn);
        assert_eq!(game.player_pos(), Position::new(6, 5));
        assert_eq!(game.position_of(orc), Some(Position::new(9, 5)));
    }

    #[test]
    fn test_walls_block_movement() {
        let mut game = arena();
        game.perform(PlayerAction::Move { dx: -1, dy: 0 });
        for _ in 0..10 {
            game.perform(PlayerAction::Move { dx: -1, dy: 0 });
        }
        assert_eq!(game.player_pos(), Position::new(1, 5));
    }

    #[test]
    fn test_bump_attacks() {
        let mut game = arena();
        let orc = spawn_monster(&mut game.world, MonsterKind::Orc, Position::new(6, 5));
        game.add_object(orc);
        game.perform(PlayerAction::Move { dx: 1, dy: 0 });
        assert_eq!(game.player_pos(), Position::new(5, 5));
        assert_eq!(game.world.get::<&Fighter>(orc).unwrap().hp, 8);
    }

    #[test]
    fn test_cancelled_use_skips_monsters() {
        let mut game = arena();
        let orc = spawn_monster(&mut game.world, MonsterKind::Orc, Position::new(10, 5));
        game.add_object(orc);
        let potion = give(&mut game, ItemKind::HealingPotion);

        assert_eq!(game.perform(PlayerAction::UseItem(0)), ActionResult::NoTurn);
        assert_eq!(game.position_of(orc), Some(Position::new(10, 5)));
        assert_eq!(game.inventory(), vec![potion]);
    }

    #[test]
    fn test_targeting_prompt_blocks_actions_until_answered() {
        let mut game = arena();
        let orc = spawn_monster(&mut game.world, MonsterKind::Orc, Position::new(9, 5));
        game.add_object(orc);
        let scroll = give(&mut game, ItemKind::ConfusionScroll);

        assert_eq!(game.perform(PlayerAction::UseItem(0)), ActionResult::NoTurn);
        assert!(matches!(game.prompt(), Some(Prompt::Targeting { .. })));
        assert_eq!(game.perform(PlayerAction::Wait), ActionResult::NoTurn);

        // Empty tile: still waiting
        assert_eq!(game.select_target(TargetInput::Select(Position::new(12, 12))), ActionResult::NoTurn);
        assert!(game.prompt().is_some());

        assert_eq!(game.select_target(TargetInput::Select(Position::new(9, 5))), ActionResult::TookTurn);
        assert!(game.prompt().is_none());
        assert!(!game.inventory().contains(&scroll));
        assert!(!game.world.contains(scroll));
        assert!(matches!(*game.world.get::<&Ai>(orc).unwrap(), Ai::Confused { .. }));
    }

    #[test]
    fn test_cancel_targeting_keeps_item_and_mana() {
        let mut game = arena();
        let scroll = give(&mut game, ItemKind::FireballScroll);
        game.perform(PlayerAction::UseItem(0));
        assert_eq!(game.select_target(TargetInput::Cancel), ActionResult::NoTurn);
        assert!(game.prompt().is_none());
        assert_eq!(game.inventory(), vec![scroll]);
        assert_eq!(game.player_fighter().unwrap().mp, 30);
    }

    #[test]
    fn test_equipment_use_toggles_and_takes_turn() {
        let mut game = arena();
        let sword = give(&mut game, ItemKind::Sword);
        assert_eq!(game.perform(PlayerAction::UseItem(0)), ActionResult::TookTurn);
        assert!(game.world.get::<&Equipment>(sword).unwrap().is_equipped);
        assert_eq!(game.inventory(), vec![sword]);
    }

    #[test]
    fn test_pick_up_nothing_takes_no_turn() {
        let mut game = arena();
        assert_eq!(game.perform(PlayerAction::PickUp), ActionResult::NoTurn);
    }

    #[test]
    fn test_level_up_prompt() {
        let mut game = arena();
        game.world.get::<&mut Fighter>(game.player).unwrap().xp = 400;
        assert_eq!(game.perform(PlayerAction::Wait), ActionResult::TookTurn);
        assert_eq!(game.prompt(), Some(&Prompt::LevelUp));
        assert_eq!(game.player_level(), 2);
        assert_eq!(game.player_fighter().unwrap().xp, 50);

        assert_eq!(game.perform(PlayerAction::Wait), ActionResult::NoTurn);
        assert!(game.choose_level_up(LevelUpChoice::Strength));
        assert!(game.prompt().is_none());
        assert_eq!(game.player_stats().power, 3);
    }

    #[test]
    fn test_death_ends_play() {
        let mut game = arena();
        let troll = spawn_monster(&mut game.world, MonsterKind::Troll, Position::new(6, 5));
        game.world.get::<&mut Fighter>(troll).unwrap().base_power = 50;
        game.add_object(troll);

        game.perform(PlayerAction::Wait);
        assert_eq!(game.state(), GameState::Dead);
        assert_eq!(game.perform(PlayerAction::Wait), ActionResult::NoTurn);
    }
}
