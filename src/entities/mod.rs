//! Entity creation: the player, the monster and item catalogues, and the
//! encounter spawner

pub mod player;
pub mod monsters;
pub mod items;
pub mod spawner;

pub use player::spawn_player;
pub use monsters::{spawn_monster, MonsterKind, MonsterTemplate};
pub use items::{spawn_item, ItemKind};
pub use spawner::{from_dungeon_level, populate_room, random_choice, random_choice_index};
