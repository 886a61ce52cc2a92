//! Reward deltas and the leveling curve.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cumulative points needed per level; level 1 starts at zero.
pub const POINTS_PER_LEVEL: u64 = 1000;

/// Level reached with `total_points` cumulative points.
///
/// Pure function of the total, so rewards can be applied in any order or batching.
pub fn level_for_points(total_points: u64) -> u32 {
    let level = total_points / POINTS_PER_LEVEL + 1;
    u32::try_from(level).unwrap_or(u32::MAX)
}

/// Points awarded by a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardDelta {
    pub points: u32,
}

impl RewardDelta {
    pub fn new(points: u32) -> Self {
        Self { points }
    }
}

/// What earned a reward. Only `Quest` counts toward completed quests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardSource {
    Quest,
    Other(String),
}

impl fmt::Display for RewardSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quest => f.write_str("quest"),
            Self::Other(source) => f.write_str(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_boundaries() {
        assert_eq!(level_for_points(0), 1);
        assert_eq!(level_for_points(999), 1);
        assert_eq!(level_for_points(1000), 2);
        assert_eq!(level_for_points(1100), 2);
        assert_eq!(level_for_points(25_000), 26);
    }

    #[test]
    fn source_display() {
        assert_eq!(RewardSource::Quest.to_string(), "quest");
        assert_eq!(RewardSource::Other("bonus".into()).to_string(), "bonus");
    }
}
