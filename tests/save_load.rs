//! Saving a run to disk and picking it back up.

use ancient_tombs::data::GameConfig;
use ancient_tombs::game::PlayerAction;
use ancient_tombs::save::{self, SaveError};
use ancient_tombs::Game;

#[test]
fn saved_run_resumes_where_it_left_off() {
    let dir = tempfile::tempdir().unwrap();
    let mut game = Game::new_game(GameConfig::default(), Some(11)).unwrap();
    for _ in 0..3 {
        game.perform(PlayerAction::Wait);
    }

    save::save_game_in(dir.path(), &game, 1).unwrap();
    let mut loaded = save::load_game_in(dir.path(), 1, GameConfig::default()).unwrap();

    assert_eq!(loaded.depth(), game.depth());
    assert_eq!(loaded.state(), game.state());
    assert_eq!(loaded.player_pos(), game.player_pos());
    assert_eq!(loaded.player_stats(), game.player_stats());
    assert_eq!(loaded.inventory_labels(), game.inventory_labels());
    assert_eq!(loaded.map().width, game.map().width);
    assert_eq!(loaded.messages(), game.messages());
    assert!(loaded.stairs().is_some());
    assert_eq!(
        loaded.stairs().and_then(|s| loaded.position_of(s)),
        game.stairs().and_then(|s| game.position_of(s))
    );

    assert!(loaded.is_playing());
    loaded.perform(PlayerAction::Wait);
}

#[test]
fn missing_and_corrupt_saves_differ() {
    let dir = tempfile::tempdir().unwrap();
    let missing = save::load_game_in(dir.path(), 4, GameConfig::default());
    assert!(matches!(missing, Err(SaveError::NotFound { slot: 4 })));

    std::fs::write(save::save_path(dir.path(), 4), b"[1, 2, 3]").unwrap();
    let corrupt = save::load_game_in(dir.path(), 4, GameConfig::default());
    assert!(matches!(corrupt, Err(SaveError::Corrupt(_))));
}

#[test]
fn deleting_a_missing_save_is_fine() {
    let dir = tempfile::tempdir().unwrap();
    save::delete_save_in(dir.path(), 9).unwrap();
    assert!(!save::save_exists_in(dir.path(), 9));
}
