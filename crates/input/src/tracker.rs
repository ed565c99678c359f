//! Held-key tracking for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout.
//! Terminal auto-repeat is swallowed: repeated presses of a held movement key,
//! and reported `Repeat` events for every key. The engine's own repeat timing
//! is the only one that applies.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};
use log::debug;

use crate::map::{is_quit, map_key_code};
use crate::types::{InputEvent, Key};

// Without release events, a short timeout prevents a single tap from turning
// into a sustained "held" state that triggers repeats.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

const MAX_HELD: usize = 4;

/// Keys whose held state matters to the engine (movement, rotation, soft drop).
fn is_holdable(key: Key) -> bool {
    matches!(key, Key::Left | Key::Right | Key::Up | Key::Down)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Held {
    key: Key,
    last_seen_ms: u64,
}

#[derive(Debug, Clone)]
pub struct KeyTracker {
    held: ArrayVec<Held, MAX_HELD>,
    release_events: bool,
    key_release_timeout_ms: u64,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self {
            held: ArrayVec::new(),
            release_events: false,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    /// The terminal reports real releases; the timeout is no longer needed.
    pub fn with_release_events(mut self, supported: bool) -> Self {
        self.release_events = supported;
        self
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u64 {
        self.key_release_timeout_ms
    }

    pub fn release_events(&self) -> bool {
        self.release_events
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.iter().any(|h| h.key == key)
    }

    /// Translate one terminal key event observed at `at_ms`.
    pub fn handle_key_event(&mut self, event: KeyEvent, at_ms: u64) -> Option<InputEvent> {
        if event.kind != KeyEventKind::Release && is_quit(event) {
            return Some(InputEvent::Quit);
        }
        let key = map_key_code(event.code)?;

        match event.kind {
            KeyEventKind::Release => {
                self.forget(key);
                Some(InputEvent::key_up(key, at_ms))
            }
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if !is_holdable(key) {
                    // One action per physical press.
                    return (event.kind == KeyEventKind::Press)
                        .then(|| InputEvent::key_down(key, at_ms));
                }
                if let Some(held) = self.held.iter_mut().find(|h| h.key == key) {
                    held.last_seen_ms = at_ms;
                    return None;
                }
                if self.held.is_full() {
                    // Oldest key loses its slot; the engine only tracks the newest anyway.
                    let dropped = self.held.remove(0);
                    debug!("Dropping held key {:?}", dropped.key);
                }
                self.held.push(Held {
                    key,
                    last_seen_ms: at_ms,
                });
                Some(InputEvent::key_down(key, at_ms))
            }
        }
    }

    /// Synthesize `KeyUp` for held keys not seen within the release timeout.
    /// Does nothing when the terminal reports releases itself.
    pub fn expire(&mut self, now_ms: u64) -> ArrayVec<InputEvent, MAX_HELD> {
        let mut released = ArrayVec::new();
        if self.release_events {
            return released;
        }

        let timeout = self.key_release_timeout_ms;
        self.held.retain(|held| {
            if now_ms.saturating_sub(held.last_seen_ms) > timeout {
                released.push(InputEvent::key_up(held.key, now_ms));
                false
            } else {
                true
            }
        });
        released
    }

    /// Drop all held keys without emitting anything.
    pub fn clear(&mut self) {
        self.held.clear();
    }

    fn forget(&mut self, key: Key) {
        self.held.retain(|h| h.key != key);
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}
