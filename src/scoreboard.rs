//! Survival scores
//!
//! Lives in process memory only: reset at process start, never mid-run.

use serde::{Deserialize, Serialize};

/// Last attempt's score and the best seen since launch (whole seconds)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub last_score: u32,
    pub highscore: u32,
    /// Attempts recorded so far
    pub attempts: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.highscore
    }

    /// Record a finished attempt. Returns true on a new best.
    pub fn record(&mut self, score: u32) -> bool {
        self.attempts += 1;
        self.last_score = score;
        let new_best = self.qualifies(score);
        if new_best {
            self.highscore = score;
        }
        new_best
    }
}
