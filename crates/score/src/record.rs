use serde::{Deserialize, Serialize};

use crate::types::MAX_NAME_LEN;

/// One ranked entry. Never mutated once it is in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighscoreRecord {
    pub name: String,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl HighscoreRecord {
    /// Build a record, truncating the name to `MAX_NAME_LEN` characters.
    pub fn new(name: &str, score: u32, level: u32, lines: u32) -> Self {
        Self {
            name: name.chars().take(MAX_NAME_LEN).collect(),
            score,
            level,
            lines,
        }
    }
}

/// Sort descending by score (stable, so earlier entries win ties) and cap.
pub fn rank(records: &mut Vec<HighscoreRecord>, max_len: usize) {
    records.sort_by(|a, b| b.score.cmp(&a.score));
    records.truncate(max_len);
}
