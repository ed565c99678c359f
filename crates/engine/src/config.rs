//! Engine tuning, with defaults taken from the policy constants in `stackfall_types`.

use crate::types::{
    DEFAULT_PREVIEW_COUNT, INITIAL_FALL_SPEED, KEY_REPEAT_DELAY_MS, KEY_REPEAT_INTERVAL_MS,
    LINES_PER_LEVEL, MIN_FALL_SPEED, SOFT_DROP_DIVISOR,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upcoming pieces kept in the lookahead queue
    pub preview_count: usize,
    /// Frames per row at level 1
    pub initial_fall_speed: u32,
    /// Frames per row never drops below this
    pub min_fall_speed: u32,
    /// Gravity interval divisor while soft drop is held
    pub soft_drop_divisor: u32,
    pub key_repeat_delay_ms: u64,
    pub key_repeat_interval_ms: u64,
    pub lines_per_level: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            preview_count: DEFAULT_PREVIEW_COUNT,
            initial_fall_speed: INITIAL_FALL_SPEED,
            min_fall_speed: MIN_FALL_SPEED,
            soft_drop_divisor: SOFT_DROP_DIVISOR,
            key_repeat_delay_ms: KEY_REPEAT_DELAY_MS,
            key_repeat_interval_ms: KEY_REPEAT_INTERVAL_MS,
            lines_per_level: LINES_PER_LEVEL,
        }
    }
}
