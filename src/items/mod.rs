//! Item system
//!
//! Carrying, wearing and using items, and the targeting rules for spells.

pub mod inventory;
pub mod equipment;
pub mod effects;
pub mod targeting;

pub use inventory::{all_equipped, drop_item, equipped_in_slot, item_at, pick_up};
pub use equipment::{dequip, equip, toggle_equip};
pub use effects::{cast, cast_at, Cast};
pub use targeting::{closest_monster, resolve_target, Target, TargetRequest};
