//! Terminal stackfall runner (default binary).
//!
//! One frame: drain pending key events into the engine, run one update,
//! render the snapshot, then sleep until the next frame.

use std::fs::File;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use log::{debug, error, info};

use stackfall::engine::{EngineConfig, Game, GameSnapshot};
use stackfall::input::KeyTracker;
use stackfall::score::{JsonFileStore, ScoreManager};
use stackfall::term::{FrameBuffer, FrameRateCounter, GameView, TerminalRenderer, Viewport};
use stackfall::types::FPS;

const LOG_FILE: &str = "stackfall.log";
const FPS_REPORT_INTERVAL_MS: u64 = 5000;

fn main() -> Result<()> {
    init_logging()?;
    info!("Starting stackfall");

    let store = JsonFileStore::default_location();
    info!("Highscores at {}", store.path().display());
    let scores = ScoreManager::new(store);
    let mut game = Game::new(EngineConfig::default(), scores, clock_seed());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    game.shutdown();
    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        error!("Could not restore terminal: {err:#}");
    }
    if let Err(err) = &result {
        error!("Exited with error: {err:#}");
    }
    info!("Exiting stackfall");
    result
}

/// The terminal is in raw mode on the alternate screen, so logs go to a file.
fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE).with_context(|| format!("creating {LOG_FILE}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_module_path(false)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(12345)
}

fn run(term: &mut TerminalRenderer, game: &mut Game) -> Result<()> {
    let start = Instant::now();
    let frame_duration = Duration::from_secs(1) / FPS;
    let now_ms = || start.elapsed().as_millis() as u64;

    let mut tracker = KeyTracker::new().with_release_events(term.key_release_events());
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut frame_rate = FrameRateCounter::new(FPS_REPORT_INTERVAL_MS);

    while game.is_running() {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(input) = tracker.handle_key_event(key, now_ms()) {
                        game.handle_event(input);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }
        let now = now_ms();
        game.handle_events(tracker.expire(now));
        if !game.is_running() {
            break;
        }

        game.update(now);

        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        // A frame that fails to draw is retried in full on the next one.
        if term.present(&mut fb) {
            if let Some(fps) = frame_rate.tick(now_ms()) {
                debug!("Average FPS: {fps:.1}");
            }
        }

        if let Some(rest) = frame_duration.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
    Ok(())
}
