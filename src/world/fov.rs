//! Field of View calculation
//!
//! Recursive shadowcasting over eight octants with a circular light radius.

use super::Map;
use crate::ecs::Position;

/// Octant transforms as (xx, xy, yx, yy) multipliers
const OCTANTS: [(i32, i32, i32, i32); 8] = [
    (1, 0, 0, 1),
    (0, 1, 1, 0),
    (0, -1, 1, 0),
    (-1, 0, 0, 1),
    (-1, 0, 0, -1),
    (0, -1, -1, 0),
    (0, 1, -1, 0),
    (1, 0, 0, -1),
];

/// Recompute the visible set around `origin`.
///
/// Clears the previous visibility, marks every lit tile visible and explored,
/// and returns the lit positions. Walls at the edge of the light are lit too.
pub fn compute_fov(map: &mut Map, origin: Position, radius: i32) -> Vec<Position> {
    map.clear_visibility();

    let mut caster = Shadowcaster {
        map,
        origin,
        radius,
        lit: Vec::new(),
    };
    caster.light(origin.x, origin.y);
    for transform in OCTANTS {
        caster.scan(1, 1.0, 0.0, transform);
    }
    caster.lit
}

struct Shadowcaster<'a> {
    map: &'a mut Map,
    origin: Position,
    radius: i32,
    lit: Vec<Position>,
}

impl Shadowcaster<'_> {
    fn light(&mut self, x: i32, y: i32) {
        if self.map.in_bounds(x, y) && !self.map.is_visible(x, y) {
            self.map.set_visible(x, y, true);
            self.lit.push(Position::new(x, y));
        }
    }

    fn scan(&mut self, row: i32, mut start: f64, end: f64, (xx, xy, yx, yy): (i32, i32, i32, i32)) {
        if start < end {
            return;
        }
        let radius_sq = self.radius * self.radius;
        let mut next_start = start;

        for distance in row..=self.radius {
            let mut blocked = false;
            let dy = -distance;

            for dx in dy..=0 {
                let left = (dx as f64 - 0.5) / (dy as f64 + 0.5);
                let right = (dx as f64 + 0.5) / (dy as f64 - 0.5);
                if start < right {
                    continue;
                }
                if end > left {
                    break;
                }

                let x = self.origin.x + dx * xx + dy * xy;
                let y = self.origin.y + dx * yx + dy * yy;
                if dx * dx + dy * dy <= radius_sq {
                    self.light(x, y);
                }

                let opaque = self.map.is_opaque(x, y);
                if blocked {
                    if opaque {
                        next_start = right;
                    } else {
                        blocked = false;
                        start = next_start;
                    }
                } else if opaque && distance < self.radius {
                    blocked = true;
                    self.scan(distance + 1, start, left, (xx, xy, yx, yy));
                    next_start = right;
                }
            }

            if blocked {
                break;
            }
        }
    }
}
