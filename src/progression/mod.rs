//! Progression systems

pub mod xp;

pub use xp::{apply_level_up, level_up_threshold, LevelUpChoice};
