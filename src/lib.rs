//! Tombs of the Ancient Kings - a turn-based terminal dungeon crawler
//!
//! Descend through randomly carved levels, fight what lives there, and
//! grow stronger with every kill.

pub mod colors;
pub mod game;
pub mod ecs;
pub mod world;
pub mod entities;
pub mod combat;
pub mod items;
pub mod progression;
pub mod ui;
pub mod save;
pub mod data;

// Re-export commonly used types
pub use game::{Game, GameState};
pub use ecs::components::*;
pub use world::map::Map;
