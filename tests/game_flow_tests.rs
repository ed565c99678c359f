//! End-to-end game flow through the public input API

mod common;

use common::{drop_until_game_over, new_game, play_one, start_run, tap};
use stackfall::engine::{EngineConfig, Game, GameState};
use stackfall::score::{JsonFileStore, ScoreManager};
use stackfall::types::{InputEvent, Key, BOARD_WIDTH, LINE_SCORES, SPAWN_POSITION};

#[test]
fn test_unsteered_drops_end_the_run() {
    let mut t = 0;
    let mut game = new_game(4242);
    start_run(&mut game, &mut t);

    let drops = drop_until_game_over(&mut game, &mut t);
    assert_eq!(game.state(), GameState::GameOver);
    assert!(drops >= 5);
    // The stack reached the top visible row.
    assert!((0..BOARD_WIDTH as i8).any(|x| game.board().get(x, 0).flatten().is_some()));

    // Nothing scored, so no name prompt; Enter goes back to the menu.
    assert!(!game.awaiting_name());
    tap(&mut game, Key::Enter, &mut t);
    assert_eq!(game.state(), GameState::Menu);
}

#[test]
fn test_cell_count_is_conserved() {
    let mut t = 0;
    let mut game = new_game(77);
    start_run(&mut game, &mut t);

    let mut locks = 0u32;
    while game.state() == GameState::Playing && locks < 150 {
        assert!(play_one(&mut game, &mut t));
        locks += 1;

        let board = game.board();
        let expected = 4 * locks as usize - 10 * board.lines_cleared() as usize;
        assert_eq!(board.occupied_count(), expected);
    }
    assert!(game.board().lines_cleared() > 0);
}

#[test]
fn test_score_follows_line_clears() {
    let mut t = 0;
    let mut game = new_game(31337);
    start_run(&mut game, &mut t);

    let mut expected = 0;
    for _ in 0..120 {
        if game.state() != GameState::Playing {
            break;
        }
        let level = game.board().level();
        let lines_before = game.board().lines_cleared();
        assert!(play_one(&mut game, &mut t));
        let cleared = game.board().lines_cleared() - lines_before;
        expected += LINE_SCORES[cleared as usize] * level;
        assert_eq!(game.scores().get_current_score(), expected);
    }
    assert!(expected > 0);
}

#[test]
fn test_gravity_locks_piece_without_input() {
    let mut t = 0;
    let mut game = new_game(5);
    start_run(&mut game, &mut t);
    let first = game.current_piece().kind;

    let interval = EngineConfig::default().initial_fall_speed as u64;
    let mut frames = 0;
    while game.board().occupied_count() == 0 {
        game.update(t + frames * 16);
        frames += 1;
        assert!(frames <= interval * 23, "piece should have landed");
    }
    assert_eq!(game.board().occupied_count(), 4);
    assert_eq!(game.board().lines_cleared(), 0);
    assert_eq!(game.current_piece().y, SPAWN_POSITION.1);
    assert_eq!(game.board().cells().iter().flatten().next(), Some(&first));
}

#[test]
fn test_held_key_repeats_through_update() {
    let mut game = new_game(9);
    let mut t = 0;
    start_run(&mut game, &mut t);

    let start_x = game.current_piece().x;
    game.handle_event(InputEvent::key_down(Key::Right, 1000));
    assert_eq!(game.current_piece().x, start_x + 1);

    game.update(1100);
    assert_eq!(game.current_piece().x, start_x + 1);
    game.update(1170);
    assert_eq!(game.current_piece().x, start_x + 2);

    game.handle_event(InputEvent::key_up(Key::Right, 1180));
    game.update(1300);
    assert_eq!(game.current_piece().x, start_x + 2);
}

#[test]
fn test_pause_drops_held_keys() {
    let mut game = new_game(9);
    let mut t = 0;
    start_run(&mut game, &mut t);

    game.handle_event(InputEvent::key_down(Key::Down, 0));
    assert!(game.soft_drop_active());
    tap(&mut game, Key::Char('p'), &mut t);
    assert!(!game.soft_drop_active());

    tap(&mut game, Key::Char('p'), &mut t);
    assert_eq!(game.state(), GameState::Playing);
    let x = game.current_piece().x;
    game.update(10_000);
    assert_eq!(game.current_piece().x, x);
}

#[test]
fn test_full_session_records_highscore() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("highscores.json");
    let mut game = Game::new(
        EngineConfig::default(),
        ScoreManager::new(JsonFileStore::new(&path)),
        2024,
    );
    let mut t = 0;
    start_run(&mut game, &mut t);

    while game.board().lines_cleared() < 2 {
        assert_eq!(game.state(), GameState::Playing);
        assert!(play_one(&mut game, &mut t));
    }
    drop_until_game_over(&mut game, &mut t);
    assert!(game.awaiting_name());

    let score = game.scores().get_current_score();
    let level = game.board().level();
    let lines = game.board().lines_cleared();
    assert!(score >= 200);

    for c in "robo!t".chars() {
        tap(&mut game, Key::Char(c), &mut t);
    }
    assert_eq!(game.player_name(), "robot");
    tap(&mut game, Key::Enter, &mut t);
    assert_eq!(game.state(), GameState::Menu);

    let reloaded = ScoreManager::new(JsonFileStore::new(&path));
    let top = &reloaded.highscores()[0];
    assert_eq!(top.name, "robot");
    assert_eq!(top.score, score);
    assert_eq!(top.level, level);
    assert_eq!(top.lines, lines);

    // The rankings screen lists it too.
    tap(&mut game, Key::Down, &mut t);
    tap(&mut game, Key::Enter, &mut t);
    assert_eq!(game.state(), GameState::Rankings);
    assert_eq!(game.snapshot().rankings[0].name, "robot");
}

#[test]
fn test_restart_starts_fresh_run() {
    let mut t = 0;
    let mut game = new_game(3);
    start_run(&mut game, &mut t);
    // 12 cells can never clear back to an empty board.
    for _ in 0..3 {
        play_one(&mut game, &mut t);
    }
    assert!(game.board().occupied_count() > 0);

    tap(&mut game, Key::Char('p'), &mut t);
    tap(&mut game, Key::Down, &mut t);
    tap(&mut game, Key::Enter, &mut t);

    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.board().occupied_count(), 0);
    assert_eq!(game.board().lines_cleared(), 0);
    assert_eq!(game.scores().get_current_score(), 0);
}

#[test]
fn test_quit_event_stops_the_loop() {
    let mut game = new_game(1);
    game.handle_event(InputEvent::Quit);
    assert!(!game.is_running());
}
