//! Key auto-repeat.
//!
//! A held key fires once on press (done by the caller), again after
//! `delay_ms`, then every `interval_ms` until released. Time only advances
//! through the timestamps passed in, so the state machine never reads a clock.

use crate::types::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatState {
    Idle,
    Held { key: Key, next_at_ms: u64 },
}

#[derive(Debug, Clone)]
pub struct KeyRepeat {
    delay_ms: u64,
    interval_ms: u64,
    state: RepeatState,
}

impl KeyRepeat {
    pub fn new(delay_ms: u64, interval_ms: u64) -> Self {
        Self {
            delay_ms,
            interval_ms: interval_ms.max(1),
            state: RepeatState::Idle,
        }
    }

    /// Start tracking `key`; the newest press replaces any held key.
    pub fn press(&mut self, key: Key, at_ms: u64) {
        self.state = RepeatState::Held {
            key,
            next_at_ms: at_ms.saturating_add(self.delay_ms),
        };
    }

    /// Stop repeating if `key` is the one being held.
    pub fn release(&mut self, key: Key) {
        if self.held() == Some(key) {
            self.state = RepeatState::Idle;
        }
    }

    pub fn reset(&mut self) {
        self.state = RepeatState::Idle;
    }

    pub fn held(&self) -> Option<Key> {
        match self.state {
            RepeatState::Idle => None,
            RepeatState::Held { key, .. } => Some(key),
        }
    }

    pub fn state(&self) -> RepeatState {
        self.state
    }

    /// Returns the held key when a repeat is due at `now_ms`. Fires at most
    /// once per call; the next repeat is scheduled one interval after `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> Option<Key> {
        match self.state {
            RepeatState::Held { key, next_at_ms } if now_ms >= next_at_ms => {
                self.state = RepeatState::Held {
                    key,
                    next_at_ms: now_ms.saturating_add(self.interval_ms),
                };
                Some(key)
            }
            _ => None,
        }
    }
}
