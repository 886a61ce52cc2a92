//! Derived progress of a story.

use serde::{Deserialize, Serialize};

/// Where a story sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressState {
    NotStarted,
    InProgress,
    Complete,
}

/// Quests completed versus quests in the story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(current: usize, total: usize) -> Self {
        Self { current, total }
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.total
    }

    /// Rounded percentage, 0 for an empty story.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = (self.current as f64 / self.total as f64 * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }

    pub fn state(&self) -> ProgressState {
        if self.is_complete() {
            ProgressState::Complete
        } else if self.current == 0 {
            ProgressState::NotStarted
        } else {
            ProgressState::InProgress
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds() {
        assert_eq!(Progress::new(1, 3).percent(), 33);
        assert_eq!(Progress::new(2, 3).percent(), 67);
        assert_eq!(Progress::new(3, 3).percent(), 100);
    }

    #[test]
    fn empty_story_is_zero_percent() {
        assert_eq!(Progress::new(0, 0).percent(), 0);
    }

    #[test]
    fn states() {
        assert_eq!(Progress::new(0, 2).state(), ProgressState::NotStarted);
        assert_eq!(Progress::new(1, 2).state(), ProgressState::InProgress);
        assert_eq!(Progress::new(2, 2).state(), ProgressState::Complete);
    }
}
