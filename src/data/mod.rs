//! Data-driven configuration
//!
//! Tunable constants live in a RON file and are loaded once at startup.

pub mod config;

pub use config::{GameConfig, SpellConfig, CONFIG_PATH};
