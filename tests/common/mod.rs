//! Shared helpers for driving a [`Game`] through its public input API.

#![allow(dead_code)]

use stackfall::core::{Board, Piece};
use stackfall::engine::{EngineConfig, Game, GameState};
use stackfall::score::{MemoryStore, ScoreManager};
use stackfall::types::{InputEvent, Key, BOARD_HEIGHT, BOARD_WIDTH, BUFFER_ROWS};

pub fn new_game(seed: u32) -> Game {
    Game::new(
        EngineConfig::default(),
        ScoreManager::new(MemoryStore::new()),
        seed,
    )
}

/// Press and release `key` at `*t`, advancing the clock by 1 ms.
pub fn tap(game: &mut Game, key: Key, t: &mut u64) {
    game.handle_event(InputEvent::key_down(key, *t));
    game.handle_event(InputEvent::key_up(key, *t));
    *t += 1;
}

pub fn start_run(game: &mut Game, t: &mut u64) {
    assert_eq!(game.state(), GameState::Menu);
    tap(game, Key::Enter, t);
    assert_eq!(game.state(), GameState::Playing);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub rotations: u8,
    pub dx: i8,
    /// Where the piece sits right before the hard drop
    pub before_drop: Piece,
}

/// Greedy placement search. Every candidate is reached the same way the
/// engine will move it: rotations in place first, then single column steps,
/// each step checked for validity.
pub fn plan(board: &Board, spawn: Piece) -> Option<Placement> {
    let mut best: Option<(f32, Placement)> = None;

    for rotations in 0..4u8 {
        let mut rotated = spawn;
        let mut reachable = true;
        for _ in 0..rotations {
            rotated.rotate();
            if !board.is_valid_position(&rotated) {
                reachable = false;
                break;
            }
        }
        if !reachable {
            continue;
        }

        let mut candidates = vec![(0i8, rotated)];
        for step in [-1i8, 1] {
            let mut piece = rotated;
            let mut dx = 0;
            loop {
                piece.x += step;
                if !board.is_valid_position(&piece) {
                    break;
                }
                dx += step;
                candidates.push((dx, piece));
            }
        }

        for (dx, piece) in candidates {
            let mut landed = piece;
            let mut after = board.clone();
            after.hard_drop(&mut landed);
            let Some(lines) = after.add_piece(&landed) else {
                continue;
            };
            let score = evaluate(&after, lines);
            if best.as_ref().map_or(true, |(s, _)| score > *s) {
                best = Some((
                    score,
                    Placement {
                        rotations,
                        dx,
                        before_drop: piece,
                    },
                ));
            }
        }
    }

    best.map(|(_, placement)| placement)
}

fn evaluate(board: &Board, lines: u32) -> f32 {
    let mut heights = [0i32; BOARD_WIDTH as usize];
    let mut holes = 0;
    for x in 0..BOARD_WIDTH as i8 {
        let mut seen = false;
        for y in -(BUFFER_ROWS as i8)..BOARD_HEIGHT as i8 {
            if board.is_occupied(x, y) {
                if !seen {
                    heights[x as usize] = BOARD_HEIGHT as i32 - y as i32;
                    seen = true;
                }
            } else if seen {
                holes += 1;
            }
        }
    }
    let aggregate: i32 = heights.iter().sum();
    let bumpiness: i32 = heights.windows(2).map(|w| (w[0] - w[1]).abs()).sum();

    -0.51 * aggregate as f32 + 0.76 * lines as f32 - 0.36 * holes as f32 - 0.18 * bumpiness as f32
}

/// Place the current piece where [`plan`] says. Returns false when no
/// placement exists.
pub fn play_one(game: &mut Game, t: &mut u64) -> bool {
    let Some(placement) = plan(game.board(), *game.current_piece()) else {
        return false;
    };
    for _ in 0..placement.rotations {
        tap(game, Key::Up, t);
    }
    let key = if placement.dx < 0 { Key::Left } else { Key::Right };
    for _ in 0..placement.dx.unsigned_abs() {
        tap(game, key, t);
    }
    assert_eq!(*game.current_piece(), placement.before_drop);
    tap(game, Key::Char(' '), t);
    true
}

/// Hard drop without steering until the run ends. Returns the drops made.
pub fn drop_until_game_over(game: &mut Game, t: &mut u64) -> u32 {
    let mut drops = 0;
    while game.state() == GameState::Playing {
        tap(game, Key::Char(' '), t);
        drops += 1;
        assert!(drops < 200, "run should end when the centre fills up");
    }
    drops
}
