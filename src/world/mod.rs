//! World module
//!
//! Contains the tile grid, room rectangles, procedural generation and field of view.

pub mod map;
pub mod tile;
pub mod rect;
pub mod fov;
pub mod generation;

pub use map::Map;
pub use tile::Tile;
pub use rect::Rect;
pub use fov::compute_fov;
pub use generation::{generate_dungeon, DungeonParams, GeneratedDungeon, GenerationError};
