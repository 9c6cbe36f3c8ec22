use std::fs;

use bracket_geometry::prelude::Point;
use tempfile::TempDir;

use soul_dungeon::{
    GameConfig, Mode,
    data::BuiltinContent,
    game::{Game, Phase},
    input::Command,
    map::{Direction, Grid, RoomKind},
    save::{JsonSlotStore, SaveError, SaveStore},
};

fn game_in(dir: &TempDir, seed: u64) -> Game {
    let config = GameConfig {
        save_dir: dir.path().to_path_buf(),
        ambient_event_chance: 0,
        ..GameConfig::default().with_seed(seed)
    };
    let store = JsonSlotStore::new(config.save_dir.clone());
    Game::new(config, Box::new(BuiltinContent::new()), Box::new(store)).unwrap()
}

/// Open ground with a mirror and an item beside the start.
fn staged_grid() -> Grid {
    let mut grid = Grid::base_layout();
    grid.set_room(Point::new(1, 0), RoomKind::Item);
    grid.set_room(Point::new(2, 0), RoomKind::Mirror);
    grid.set_room(Point::new(4, 4), RoomKind::Demon);
    grid
}

#[test]
fn saved_journey_comes_back_intact() {
    let dir = tempfile::tempdir().unwrap();
    let mut game = game_in(&dir, 99);
    game.handle(Command::Select(1)).unwrap();
    game.grid = staged_grid();

    for command in [
        Command::Move(Direction::East),
        Command::Take,
        Command::Move(Direction::East),
        Command::Mirror,
    ] {
        game.handle(command).unwrap();
    }
    game.milestones.demons_faced = 2;
    game.phase = Phase::Struggle;
    game.handle(Command::Save).unwrap();
    game.handle(Command::Select(3)).unwrap();
    assert_eq!(game.messages()[0], "Journey saved to slot 3.");
    assert!(dir.path().join("save_slot_3.json").is_file());

    let expected = game.snapshot();

    let mut restored = game_in(&dir, 1);
    restored.handle(Command::Select(2)).unwrap();
    assert!(matches!(restored.mode(), Mode::LoadPrompt { .. }));
    restored.handle(Command::Select(3)).unwrap();
    assert!(matches!(restored.mode(), Mode::Exploring));

    let actual = restored.snapshot();
    assert_eq!(actual.player, expected.player);
    assert_eq!(actual.grid, expected.grid);
    assert_eq!(actual.phase, Phase::Struggle);
    assert_eq!(actual.history, expected.history);
    assert_eq!(actual.milestones, expected.milestones);
    assert_eq!(actual.turn, expected.turn);
    assert_eq!(restored.player.memories.len(), 1);
    assert_eq!(restored.player.inventory.len(), 1);
    assert_eq!(restored.grid.room_at(Point::new(1, 0)), Some(RoomKind::Empty));
    assert_eq!(restored.grid.room_at(Point::new(2, 0)), Some(RoomKind::Mirror));

    let hope = restored.player.hope;
    restored.handle(Command::Mirror).unwrap();
    assert!(restored.player.hope > hope);
}

#[test]
fn missing_and_corrupt_slots_leave_the_session_alone() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("save_slot_2.json"), "{ \"version\": ").unwrap();

    let mut game = game_in(&dir, 4);
    game.handle(Command::Select(1)).unwrap();
    game.handle(Command::Load).unwrap();

    game.handle(Command::Select(1)).unwrap();
    assert_eq!(game.messages()[0], "No saved journey in slot 1.");

    let before = game.snapshot();
    game.handle(Command::Select(2)).unwrap();
    assert!(game.messages()[0].starts_with("Load failed: save file is corrupt"));
    assert!(matches!(game.mode(), Mode::LoadPrompt { .. }));
    assert_eq!(game.snapshot().player, before.player);
    assert_eq!(game.snapshot().grid, before.grid);

    game.handle(Command::Quit).unwrap();
    assert!(matches!(game.mode(), Mode::Exploring));
}

#[test]
fn store_distinguishes_failures() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonSlotStore::new(dir.path().join("nested"));
    assert!(matches!(store.load(1), Err(SaveError::NotFound { slot: 1 })));
    assert!(matches!(store.load(5), Err(SaveError::InvalidSlot(5))));
    assert!(!store.occupied(1));

    let dir_for_game = tempfile::tempdir().unwrap();
    let game = game_in(&dir_for_game, 2);
    store.save(&game.snapshot(), 1).unwrap();
    assert!(store.occupied(1));
    assert!(store.slot_path(1).starts_with(dir.path().join("nested")));

    let leftovers: Vec<_> = fs::read_dir(dir.path().join("nested"))
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
