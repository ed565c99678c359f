//! Game controller - the state machine that owns a run
//!
//! Ties together the board, the piece generator and the score manager. Input
//! events are routed to one handler per [`GameState`]; [`Game::update`] runs
//! once per frame and applies key repeat and gravity while playing.
//!
//! A frame is: drain input with [`Game::handle_event`], call
//! [`Game::update`] once, then render from [`Game::snapshot`].

use log::{debug, info, warn};

use crate::config::EngineConfig;
use crate::core::scoring::{fall_interval_frames, soft_drop_interval_frames};
use crate::core::{Board, Piece, PieceGenerator, SimpleRng};
use crate::menu::{MainMenuItem, MenuCursor, PauseMenuItem, MAIN_MENU, PAUSE_MENU};
use crate::repeat::KeyRepeat;
use crate::score::ScoreManager;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{InputEvent, Key, PieceKind, MAX_NAME_LEN};

/// Screen the controller is on; exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Menu,
    Playing,
    Paused,
    GameOver,
    Rankings,
    Settings,
}

/// Characters accepted in the highscore name prompt
pub fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, ' ' | '-' | '_')
}

fn is_pause_key(key: Key) -> bool {
    matches!(key, Key::Char('p') | Key::Char('P'))
}

pub struct Game {
    config: EngineConfig,
    state: GameState,
    running: bool,
    board: Board,
    generator: PieceGenerator,
    current: Piece,
    scores: ScoreManager,
    /// Seeds a fresh generator for every run
    seeder: SimpleRng,
    fall_counter: u32,
    soft_drop: bool,
    repeat: KeyRepeat,
    menu: MenuCursor,
    player_name: String,
}

impl Game {
    /// Create a controller sitting on the main menu.
    pub fn new(config: EngineConfig, scores: ScoreManager, seed: u32) -> Self {
        let mut seeder = SimpleRng::new(seed);
        let mut generator = PieceGenerator::with_preview(seeder.next_u32(), config.preview_count);
        let current = generator.get_next_piece();

        Self {
            config,
            state: GameState::Menu,
            running: true,
            board: Board::with_lines_per_level(config.lines_per_level),
            generator,
            current,
            scores,
            seeder,
            fall_counter: 0,
            soft_drop: false,
            repeat: KeyRepeat::new(config.key_repeat_delay_ms, config.key_repeat_interval_ms),
            menu: MenuCursor::default(),
            player_name: String::new(),
        }
    }

    /// Reset board, generator, timers and score for a new run.
    fn init_game(&mut self) {
        self.board = Board::with_lines_per_level(self.config.lines_per_level);
        self.generator =
            PieceGenerator::with_preview(self.seeder.next_u32(), self.config.preview_count);
        self.current = self.generator.get_next_piece();
        self.fall_counter = 0;
        self.release_inputs();
        self.scores.reset_score();
        info!("New run started");
    }

    fn enter(&mut self, state: GameState) {
        if self.state != state {
            debug!("State {:?} -> {:?}", self.state, state);
        }
        if self.state == GameState::Playing && state != GameState::Playing {
            self.release_inputs();
        }
        self.state = state;
        self.menu.reset();
    }

    fn release_inputs(&mut self) {
        self.soft_drop = false;
        self.repeat.reset();
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// False once the player quit
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    pub fn next_pieces(&self) -> &[PieceKind] {
        self.generator.peek_next_pieces()
    }

    pub fn scores(&self) -> &ScoreManager {
        &self.scores
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn menu_selected(&self) -> usize {
        self.menu.selected()
    }

    pub fn soft_drop_active(&self) -> bool {
        self.soft_drop
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Game over with a score that earns a place in the ranking
    pub fn awaiting_name(&self) -> bool {
        self.state == GameState::GameOver && self.scores.is_highscore()
    }

    /// Stop the loop and flush highscores. A failed save is logged only.
    pub fn shutdown(&mut self) {
        self.running = false;
        match self.scores.save_highscores() {
            Ok(()) => info!("Highscores saved"),
            Err(err) => warn!("Could not save highscores on shutdown: {err:#}"),
        }
    }

    /// Apply one input event to the current state.
    pub fn handle_event(&mut self, event: InputEvent) {
        if event == InputEvent::Quit {
            info!("Quit requested");
            self.running = false;
            return;
        }

        match self.state {
            GameState::Menu => self.handle_menu_event(event),
            GameState::Playing => self.handle_playing_event(event),
            GameState::Paused => self.handle_pause_event(event),
            GameState::GameOver => self.handle_game_over_event(event),
            GameState::Rankings => self.handle_rankings_event(event),
            GameState::Settings => self.handle_settings_event(event),
        }
    }

    pub fn handle_events(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.handle_event(event);
        }
    }

    fn handle_menu_event(&mut self, event: InputEvent) {
        let InputEvent::KeyDown { key, .. } = event else {
            return;
        };
        match self.menu.handle(key, &MAIN_MENU) {
            Some(MainMenuItem::Play) => {
                self.init_game();
                self.enter(GameState::Playing);
            }
            Some(MainMenuItem::Rankings) => self.enter(GameState::Rankings),
            Some(MainMenuItem::Settings) => self.enter(GameState::Settings),
            Some(MainMenuItem::Quit) => {
                info!("Quit selected from menu");
                self.running = false;
            }
            None => {}
        }
    }

    fn handle_playing_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown { key, at_ms } => match key {
                k if is_pause_key(k) => self.enter(GameState::Paused),
                Key::Escape => {
                    info!("Run abandoned at {} points", self.scores.get_current_score());
                    self.enter(GameState::Menu);
                }
                Key::Char(' ') => self.hard_drop(),
                Key::Down => self.soft_drop = true,
                Key::Left | Key::Right | Key::Up => {
                    self.repeat.press(key, at_ms);
                    self.apply_movement(key);
                }
                _ => {}
            },
            InputEvent::KeyUp { key, .. } => {
                if key == Key::Down {
                    self.soft_drop = false;
                }
                self.repeat.release(key);
            }
            InputEvent::Quit => {}
        }
    }

    fn handle_pause_event(&mut self, event: InputEvent) {
        let InputEvent::KeyDown { key, .. } = event else {
            return;
        };
        if is_pause_key(key) {
            self.enter(GameState::Playing);
            return;
        }
        match self.menu.handle(key, &PAUSE_MENU) {
            Some(PauseMenuItem::Continue) => self.enter(GameState::Playing),
            Some(PauseMenuItem::Restart) => {
                self.init_game();
                self.enter(GameState::Playing);
            }
            Some(PauseMenuItem::MainMenu) => self.enter(GameState::Menu),
            None => {}
        }
    }

    fn handle_game_over_event(&mut self, event: InputEvent) {
        let InputEvent::KeyDown { key, .. } = event else {
            return;
        };

        if !self.scores.is_highscore() {
            if matches!(key, Key::Enter | Key::Escape) {
                self.enter(GameState::Menu);
            }
            return;
        }

        match key {
            Key::Enter => {
                self.scores.add_highscore(
                    &self.player_name,
                    self.board.level(),
                    self.board.lines_cleared(),
                );
                self.player_name.clear();
                self.enter(GameState::Menu);
            }
            Key::Backspace => {
                self.player_name.pop();
            }
            Key::Char(c) if is_name_char(c) && self.player_name.chars().count() < MAX_NAME_LEN => {
                self.player_name.push(c);
            }
            _ => {}
        }
    }

    fn handle_rankings_event(&mut self, event: InputEvent) {
        if let InputEvent::KeyDown { key: Key::Escape, .. } = event {
            self.enter(GameState::Menu);
        }
    }

    fn handle_settings_event(&mut self, event: InputEvent) {
        // Nothing to configure yet; any key leaves.
        if let InputEvent::KeyDown { .. } = event {
            self.enter(GameState::Menu);
        }
    }

    /// Frames per row right now, soft drop included
    pub fn fall_interval(&self) -> u32 {
        let base = fall_interval_frames(
            self.board.level(),
            self.config.initial_fall_speed,
            self.config.min_fall_speed,
        );
        if self.soft_drop {
            soft_drop_interval_frames(base, self.config.soft_drop_divisor)
        } else {
            base
        }
    }

    /// One frame of game time: key repeat, then gravity.
    pub fn update(&mut self, now_ms: u64) {
        if self.state != GameState::Playing {
            return;
        }

        if let Some(key) = self.repeat.poll(now_ms) {
            self.apply_movement(key);
        }

        self.fall_counter += 1;
        if self.fall_counter >= self.fall_interval() {
            self.move_piece_down();
            self.fall_counter = 0;
        }
    }

    /// Tentatively move or rotate; reverted as a whole if the result collides.
    fn apply_movement(&mut self, key: Key) -> bool {
        let original = self.current;
        match key {
            Key::Left => self.current.move_left(),
            Key::Right => self.current.move_right(),
            Key::Up => self.current.rotate(),
            _ => return false,
        }
        if self.board.is_valid_position(&self.current) {
            true
        } else {
            self.current = original;
            false
        }
    }

    fn move_piece_down(&mut self) {
        let mut next = self.current;
        next.move_down();
        if self.board.is_valid_position(&next) {
            self.current = next;
        } else {
            self.lock_and_spawn();
        }
    }

    fn hard_drop(&mut self) {
        let distance = self.board.hard_drop(&mut self.current);
        debug!("Hard drop of {} rows", distance);
        self.lock_and_spawn();
    }

    /// Lock the current piece, score its clear, then spawn the next one.
    /// Either a failed lock or a blocked spawn ends the run.
    fn lock_and_spawn(&mut self) {
        let level = self.board.level();
        let Some(lines) = self.board.add_piece(&self.current) else {
            self.game_over();
            return;
        };
        if lines > 0 {
            let points = self.scores.add_line_clear(lines, level);
            debug!("Cleared {} lines at level {} for {} points", lines, level, points);
            if self.board.level() > level {
                info!("Level up: {}", self.board.level());
            }
        }
        // The buffer only hosts spawning pieces; a lock that leaves cells there is a lock-out.
        if self.board.buffer_occupied() {
            debug!("Piece locked above the visible field");
            self.game_over();
            return;
        }

        self.current = self.generator.get_next_piece();
        self.fall_counter = 0;
        if !self.board.is_valid_position(&self.current) {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        info!(
            "Game over - score {}, level {}, lines {}",
            self.scores.get_current_score(),
            self.board.level(),
            self.board.lines_cleared()
        );
        self.player_name.clear();
        self.enter(GameState::GameOver);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.state = self.state;
        let in_run = matches!(
            self.state,
            GameState::Playing | GameState::Paused | GameState::GameOver
        );
        self.board.write_u8_grid(&mut out.board);
        out.active = in_run.then(|| ActiveSnapshot::from(self.current));
        out.next_queue.clear();
        out.next_queue
            .extend(self.generator.peek_next_pieces().iter().copied());
        out.score = self.scores.get_current_score();
        out.highscore = self.scores.get_highscore();
        out.level = self.board.level();
        out.lines = self.board.lines_cleared();
        out.menu_selected = self.menu.selected();
        out.name_entry = self.awaiting_name();
        out.player_name.clear();
        out.player_name.push_str(&self.player_name);
        out.rankings.clear();
        out.rankings.extend_from_slice(self.scores.highscores());
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, piece: Piece) {
        self.current = piece;
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("running", &self.running)
            .field("current", &self.current)
            .field("scores", &self.scores)
            .finish_non_exhaustive()
    }
}
