//! Entity Component System module
//!
//! Components for dungeon entities and the monster AI systems.

pub mod components;
pub mod ai;

pub use components::*;
pub use ai::{is_blocked, move_by, move_towards, take_turn};
