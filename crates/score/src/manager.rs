//! Score manager - current run score plus the persisted ranking.
//!
//! The in-memory list is authoritative. Store failures are logged and never
//! interrupt a run; the next successful save writes the whole list again.

use log::{info, warn};

use crate::core::calculate_line_score;
use crate::record::{rank, HighscoreRecord};
use crate::store::HighscoreStore;
use crate::types::MAX_HIGHSCORES;

/// Name recorded when the player leaves the name buffer empty
pub const ANONYMOUS_NAME: &str = "Anonymous";

pub struct ScoreManager {
    score: u32,
    highscores: Vec<HighscoreRecord>,
    max_highscores: usize,
    store: Box<dyn HighscoreStore>,
}

impl ScoreManager {
    /// Load the ranking from `store`. A failed load starts from an empty list.
    pub fn new(store: impl HighscoreStore + 'static) -> Self {
        Self::with_capacity(store, MAX_HIGHSCORES)
    }

    pub fn with_capacity(store: impl HighscoreStore + 'static, max_highscores: usize) -> Self {
        let mut highscores = match store.load() {
            Ok(records) => records,
            Err(err) => {
                warn!("Could not load highscores, starting empty: {err:#}");
                Vec::new()
            }
        };
        rank(&mut highscores, max_highscores);
        info!("Loaded {} highscore records", highscores.len());

        Self {
            score: 0,
            highscores,
            max_highscores,
            store: Box::new(store),
        }
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    pub fn get_current_score(&self) -> u32 {
        self.score
    }

    /// Credit one batched clear of `lines` rows at `level`; returns the points awarded.
    pub fn add_line_clear(&mut self, lines: u32, level: u32) -> u32 {
        let points = calculate_line_score(lines, level);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Whether the current score would enter the ranking
    pub fn is_highscore(&self) -> bool {
        if self.score == 0 || self.max_highscores == 0 {
            return false;
        }
        if self.highscores.len() < self.max_highscores {
            return true;
        }
        self.highscores
            .last()
            .map_or(true, |lowest| self.score > lowest.score)
    }

    /// Record the current score under `name` and persist the ranking.
    pub fn add_highscore(&mut self, name: &str, level: u32, lines: u32) {
        let name = name.trim();
        let name = if name.is_empty() { ANONYMOUS_NAME } else { name };
        let record = HighscoreRecord::new(name, self.score, level, lines);
        info!(
            "New highscore: {} with {} points (level {}, {} lines)",
            record.name, record.score, record.level, record.lines
        );

        self.highscores.push(record);
        rank(&mut self.highscores, self.max_highscores);

        if let Err(err) = self.save_highscores() {
            warn!("Could not save highscores: {err:#}");
        }
    }

    /// Flush the ranking to the store.
    pub fn save_highscores(&self) -> anyhow::Result<()> {
        self.store.save(&self.highscores)
    }

    /// Best score to display: the top record, or the running score once it is higher.
    pub fn get_highscore(&self) -> u32 {
        let top = self.highscores.first().map_or(0, |r| r.score);
        top.max(self.score)
    }

    pub fn highscores(&self) -> &[HighscoreRecord] {
        &self.highscores
    }
}

impl std::fmt::Debug for ScoreManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreManager")
            .field("score", &self.score)
            .field("highscores", &self.highscores)
            .field("max_highscores", &self.max_highscores)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn manager_with(scores: &[u32]) -> (ScoreManager, MemoryStore) {
        let records = scores
            .iter()
            .map(|&s| HighscoreRecord::new("p", s, 1, 0))
            .collect();
        let store = MemoryStore::with_records(records);
        (ScoreManager::new(store.clone()), store)
    }

    #[test]
    fn single_clear_at_level_one() {
        let (mut scores, _) = manager_with(&[]);
        assert_eq!(scores.add_line_clear(1, 1), 100);
        assert_eq!(scores.get_current_score(), 100);
    }

    #[test]
    fn tetris_beats_four_singles() {
        let (mut singles, _) = manager_with(&[]);
        for _ in 0..4 {
            singles.add_line_clear(1, 1);
        }
        let (mut tetris, _) = manager_with(&[]);
        tetris.add_line_clear(4, 1);
        assert!(tetris.get_current_score() > singles.get_current_score());
    }

    #[test]
    fn reset_zeroes_score() {
        let (mut scores, _) = manager_with(&[]);
        scores.add_line_clear(2, 3);
        scores.reset_score();
        assert_eq!(scores.get_current_score(), 0);
    }

    #[test]
    fn zero_score_never_qualifies() {
        let (scores, _) = manager_with(&[]);
        assert!(!scores.is_highscore());
    }

    #[test]
    fn qualifies_while_list_has_room() {
        let (mut scores, _) = manager_with(&[5000, 4000]);
        scores.add_line_clear(1, 1);
        assert!(scores.is_highscore());
    }

    #[test]
    fn full_list_needs_to_beat_the_lowest() {
        let full: Vec<u32> = (1..=10).map(|i| i * 100).collect();
        let (mut scores, _) = manager_with(&full);

        scores.add_line_clear(1, 1); // 100, ties the lowest
        assert!(!scores.is_highscore());

        scores.add_line_clear(1, 1); // 200
        assert!(scores.is_highscore());
    }

    #[test]
    fn add_highscore_sorts_truncates_and_persists() {
        let full: Vec<u32> = (1..=10).map(|i| i * 100).collect();
        let (mut scores, store) = manager_with(&full);
        scores.add_line_clear(2, 2); // 600

        scores.add_highscore("  ", 2, 2);

        let list = scores.highscores();
        assert_eq!(list.len(), 10);
        assert_eq!(list[0].score, 1000);
        assert!(list.iter().all(|r| r.score != 100));
        let new_entry = list.iter().find(|r| r.name == ANONYMOUS_NAME).unwrap();
        assert_eq!(new_entry.score, 600);
        assert!(list.windows(2).all(|w| w[0].score >= w[1].score));

        assert_eq!(store.records(), list.to_vec());
    }

    #[test]
    fn failed_load_starts_empty() {
        let scores = ScoreManager::new(MemoryStore::failing());
        assert!(scores.highscores().is_empty());
    }

    #[test]
    fn failed_save_keeps_memory_authoritative() {
        let mut scores = ScoreManager::new(MemoryStore::failing());
        scores.add_line_clear(1, 1);
        scores.add_highscore("eve", 1, 1);

        assert_eq!(scores.highscores().len(), 1);
        assert!(scores.save_highscores().is_err());
    }

    #[test]
    fn get_highscore_tracks_running_score() {
        let (mut scores, _) = manager_with(&[300]);
        assert_eq!(scores.get_highscore(), 300);
        scores.add_line_clear(4, 1);
        assert_eq!(scores.get_highscore(), 800);
    }

    #[test]
    fn unsorted_store_is_ranked_on_load() {
        let (scores, _) = manager_with(&[10, 30, 20]);
        let ordered: Vec<u32> = scores.highscores().iter().map(|r| r.score).collect();
        assert_eq!(ordered, [30, 20, 10]);
    }
}
