//! Procedural level generation
//!
//! Rooms-and-corridors layout for each dungeon level.

pub mod rooms;

pub use rooms::generate_dungeon;

use thiserror::Error;

use crate::ecs::Position;
use crate::world::{Map, Rect};

/// Parameters for one level layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DungeonParams {
    pub width: i32,
    pub height: i32,
    /// Number of placement attempts, not a guaranteed room count
    pub max_rooms: u32,
    pub room_min_size: i32,
    pub room_max_size: i32,
}

impl Default for DungeonParams {
    fn default() -> Self {
        Self {
            width: 80,
            height: 43,
            max_rooms: 30,
            room_min_size: 6,
            room_max_size: 10,
        }
    }
}

/// A freshly generated level layout
#[derive(Debug, Clone)]
pub struct GeneratedDungeon {
    pub map: Map,
    /// Rooms in placement order
    pub rooms: Vec<Rect>,
}

impl GeneratedDungeon {
    /// Player start
    pub fn first_center(&self) -> Position {
        self.rooms[0].center()
    }

    /// Stairs location
    pub fn last_center(&self) -> Position {
        self.rooms[self.rooms.len() - 1].center()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("no room could be placed on a {width}x{height} map in {attempts} attempts")]
    NoRooms { width: i32, height: i32, attempts: u32 },

    #[error("room size {min}..={max} does not fit a {width}x{height} map")]
    InvalidRoomSize {
        min: i32,
        max: i32,
        width: i32,
        height: i32,
    },
}
