//! Scoring module - line-clear points, levels and gravity
//!
//! All values come from the policy table in `stackfall_types`:
//! - A batched clear of N rows pays `LINE_SCORES[N] * level`.
//! - Level starts at 1 and rises every `LINES_PER_LEVEL` lines.
//! - Gravity is counted in frames and speeds up by one frame per level.

use crate::types::{FALL_SPEED_DECREMENT, LINE_SCORES};

/// Points for clearing `lines` rows in a single lock at `level` (1-based)
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    if lines == 0 || lines as usize >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines as usize].saturating_mul(level.max(1))
}

/// Level for a cumulative line count
pub fn calculate_level(total_lines: u32, lines_per_level: u32) -> u32 {
    1 + total_lines / lines_per_level.max(1)
}

/// Frames per row at `level`, floored at `min_fall_speed`
pub fn fall_interval_frames(level: u32, initial_fall_speed: u32, min_fall_speed: u32) -> u32 {
    let decrement = level.saturating_sub(1).saturating_mul(FALL_SPEED_DECREMENT);
    initial_fall_speed
        .saturating_sub(decrement)
        .max(min_fall_speed)
}

/// Soft drop interval: base interval divided, never below one frame
pub fn soft_drop_interval_frames(base_interval: u32, divisor: u32) -> u32 {
    (base_interval / divisor.max(1)).max(1)
}
