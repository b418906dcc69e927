//! Tile definitions
//!
//! A single map cell and its movement/sight properties.

use serde::{Deserialize, Serialize};

use crate::colors::{self, Rgb};

/// A single tile in the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub blocked: bool,
    pub blocks_sight: bool,
    /// Set once the tile has been in view; never cleared
    pub explored: bool,
    /// In the current field of view (recomputed, not saved)
    #[serde(skip)]
    pub visible: bool,
}

impl Tile {
    /// Create a tile whose sight blocking follows its movement blocking
    pub fn new(blocked: bool) -> Self {
        Self::with_sight(blocked, blocked)
    }

    /// Create a tile with an explicit sight-blocking override
    pub fn with_sight(blocked: bool, blocks_sight: bool) -> Self {
        Self {
            blocked,
            blocks_sight,
            explored: false,
            visible: false,
        }
    }

    pub fn wall() -> Self {
        Self::new(true)
    }

    /// Dig the tile out so it can be walked on and seen through
    pub fn tunnel(&mut self) {
        self.blocked = false;
        self.blocks_sight = false;
    }

    pub fn is_walkable(&self) -> bool {
        !self.blocked
    }

    pub fn is_transparent(&self) -> bool {
        !self.blocks_sight
    }

    /// Background color: bright when lit, dim when only remembered
    pub fn bg_color(&self, lit: bool) -> Rgb {
        match (self.blocks_sight, lit) {
            (true, true) => colors::LIGHT_WALL,
            (true, false) => colors::DARK_WALL,
            (false, true) => colors::LIGHT_GROUND,
            (false, false) => colors::DARK_GROUND,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::wall()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sight_defaults_to_blocked() {
        assert!(Tile::new(true).blocks_sight);
        assert!(!Tile::new(false).blocks_sight);
        // Override: an invisible wall
        let glass = Tile::with_sight(true, false);
        assert!(glass.blocked && glass.is_transparent());
    }

    #[test]
    fn test_tunnel_clears_both_flags() {
        let mut tile = Tile::wall();
        tile.tunnel();
        assert!(tile.is_walkable());
        assert!(tile.is_transparent());
        assert!(!tile.explored);
    }
}
