//! Save/load system
//!
//! Serializes a whole run to JSON in a per-user data directory.

pub mod save_game;

pub use save_game::{
    delete_save, delete_save_in, extract_save_data, load_game, load_game_in, read_save, restore_game,
    save_directory, save_exists_in, save_game, save_game_in, save_path, EntitySaveData,
    SaveData, SaveError,
};
