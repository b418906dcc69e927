//! Map data structure
//!
//! The fixed-size 2D tile grid of one dungeon level.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::tile::Tile;

/// A dungeon level's tile grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<Tile>,
}

impl Map {
    /// Create a new map filled with walls
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width.max(0) * height.max(0)) as usize;
        Self {
            width,
            height,
            tiles: vec![Tile::wall(); len],
        }
    }

    #[inline]
    pub fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        if self.in_bounds(x, y) {
            Some(&self.tiles[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    pub fn get_tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            Some(&mut self.tiles[idx])
        } else {
            None
        }
    }

    /// Tile blocks movement. Out-of-bounds counts as blocked.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(true, |t| t.blocked)
    }

    /// Tile blocks line of sight. Out-of-bounds counts as opaque.
    pub fn is_opaque(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(true, |t| t.blocks_sight)
    }

    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(false, |t| t.visible)
    }

    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(false, |t| t.explored)
    }

    /// Set visibility; anything seen becomes explored for good
    pub fn set_visible(&mut self, x: i32, y: i32, visible: bool) {
        if let Some(tile) = self.get_tile_mut(x, y) {
            tile.visible = visible;
            if visible {
                tile.explored = true;
            }
        }
    }

    pub fn clear_visibility(&mut self) {
        for tile in &mut self.tiles {
            tile.visible = false;
        }
    }

    /// Dig out a single cell
    pub fn tunnel(&mut self, x: i32, y: i32) {
        if let Some(tile) = self.get_tile_mut(x, y) {
            tile.tunnel();
        }
    }

    /// Carve the interior of a room, leaving its border as wall
    pub fn carve_room(&mut self, room: &Rect) {
        for y in (room.y1 + 1)..room.y2 {
            for x in (room.x1 + 1)..room.x2 {
                self.tunnel(x, y);
            }
        }
    }

    /// Horizontal corridor, endpoints inclusive
    pub fn carve_h_tunnel(&mut self, x1: i32, x2: i32, y: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.tunnel(x, y);
        }
    }

    /// Vertical corridor, endpoints inclusive
    pub fn carve_v_tunnel(&mut self, y1: i32, y2: i32, x: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.tunnel(x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_map_is_solid() {
        let map = Map::new(10, 6);
        assert_eq!(map.tiles.len(), 60);
        assert!(map.tiles.iter().all(|t| t.blocked && t.blocks_sight));
    }

    #[test]
    fn test_out_of_bounds_is_blocked() {
        let map = Map::new(5, 5);
        assert!(map.is_blocked(-1, 0));
        assert!(map.is_blocked(5, 2));
        assert!(map.is_opaque(2, 99));
        assert!(!map.is_visible(-3, -3));
    }

    #[test]
    fn test_carve_room_keeps_walls() {
        let mut map = Map::new(10, 10);
        map.carve_room(&Rect::new(1, 1, 4, 4));
        assert!(map.is_blocked(1, 1));
        assert!(!map.is_blocked(2, 2));
        assert!(!map.is_blocked(4, 4));
        assert!(map.is_blocked(5, 5));
    }

    #[test]
    fn test_tunnels_are_inclusive_either_direction() {
        let mut map = Map::new(10, 10);
        map.carve_h_tunnel(7, 2, 3);
        map.carve_v_tunnel(8, 1, 5);
        for x in 2..=7 {
            assert!(!map.is_blocked(x, 3));
        }
        for y in 1..=8 {
            assert!(!map.is_blocked(5, y));
        }
        assert!(map.is_blocked(8, 3));
    }

    #[test]
    fn test_explored_survives_visibility_clear() {
        let mut map = Map::new(4, 4);
        map.set_visible(1, 1, true);
        map.clear_visibility();
        assert!(!map.is_visible(1, 1));
        assert!(map.is_explored(1, 1));
    }
}
