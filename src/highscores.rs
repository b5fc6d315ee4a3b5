//! High score leaderboard system
//!
//! Persisted to LocalStorage, tracks top 10 towers.

use serde::{Deserialize, Serialize};

use crate::storage;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u32,
    /// Boxes stacked on the platform
    pub height: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "stack_tower_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Must beat the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u32, height: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            height,
            timestamp,
        };

        // Sorted descending; ties keep the older entry first
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from LocalStorage (empty on native)
    pub fn load() -> Self {
        let scores: Self = storage::load_or_default(Self::STORAGE_KEY);
        log::info!("{} high scores on record", scores.entries.len());
        scores
    }

    /// Save high scores to LocalStorage (no-op on native)
    pub fn save(&self) {
        storage::save_or_warn(Self::STORAGE_KEY, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.potential_rank(0), None);
    }

    #[test]
    fn test_add_score_sorted() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(10, 8, 1.0), Some(1));
        assert_eq!(scores.add_score(30, 12, 2.0), Some(1));
        assert_eq!(scores.add_score(20, 10, 3.0), Some(2));
        // Tie goes below the existing entry
        assert_eq!(scores.add_score(20, 9, 4.0), Some(3));

        let order: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![30, 20, 20, 10]);
        assert_eq!(scores.top_score(), Some(30));
        assert_eq!(scores.entries[2].height, 9);
    }

    #[test]
    fn test_leaderboard_truncates() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u32 {
            scores.add_score(s * 10, s, s as f64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);

        // Does not beat the lowest (10)
        assert!(!scores.qualifies(10));
        assert_eq!(scores.add_score(5, 1, 0.0), None);

        assert_eq!(scores.potential_rank(55), Some(6));
        assert_eq!(scores.add_score(55, 6, 99.0), Some(6));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_json_roundtrip_shape() {
        let mut scores = HighScores::new();
        scores.add_score(7, 3, 1700000000000.0);
        let json = serde_json::to_string(&scores).unwrap();
        let back: HighScores = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries, scores.entries);
    }
}
