//! Quest templates as authored by the adventure generator.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::geo::Coordinates;
use crate::error::DomainError;

/// Points awarded when a quest carries no (or a zero) point value.
pub const DEFAULT_QUEST_POINTS: u32 = 100;

/// The kind of task a quest asks of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestType {
    Puzzle,
    Photo,
    Navigation,
    AudioStory,
    Exploration,
}

impl QuestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Puzzle => "puzzle",
            Self::Photo => "photo",
            Self::Navigation => "navigation",
            Self::AudioStory => "audio_story",
            Self::Exploration => "exploration",
        }
    }
}

impl fmt::Display for QuestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "puzzle" => Ok(Self::Puzzle),
            "photo" => Ok(Self::Photo),
            "navigation" => Ok(Self::Navigation),
            "audio_story" | "audiostory" => Ok(Self::AudioStory),
            "exploration" => Ok(Self::Exploration),
            other => Err(DomainError::parse(format!("Unknown quest type: {}", other))),
        }
    }
}

/// A riddle attached to a puzzle quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    pub prompt: String,
    pub solution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Puzzle {
    /// Case-insensitive, whitespace-trimmed exact match against the solution.
    pub fn is_solved_by(&self, answer: &str) -> bool {
        normalize_answer(answer) == normalize_answer(&self.solution)
    }
}

fn normalize_answer(s: &str) -> String {
    s.trim().to_lowercase()
}

/// One step of an adventure. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub title: String,
    pub description: String,
    pub narrative: String,
    #[serde(rename = "type")]
    pub quest_type: QuestType,
    pub target_location_name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puzzle: Option<Puzzle>,
    #[serde(
        default,
        deserialize_with = "lenient_points",
        skip_serializing_if = "Option::is_none"
    )]
    pub points: Option<u32>,
}

/// Generators sometimes emit `150.0` or a negative number. Whole positive
/// values are kept; anything else is treated as absent.
fn lenient_points<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let whole = value.is_finite() && value.fract() == 0.0;
        (whole && value > 0.0 && value <= f64::from(u32::MAX)).then_some(value as u32)
    }))
}

impl Quest {
    /// Points this quest is worth, falling back to the default for absent or zero values.
    pub fn reward_points(&self) -> u32 {
        match self.points {
            Some(points) if points > 0 => points,
            _ => DEFAULT_QUEST_POINTS,
        }
    }

    pub fn target(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Check the template invariants for this quest.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a puzzle quest lacks a puzzle or
    /// its solution is blank, or if the target coordinates are out of range.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.quest_type == QuestType::Puzzle {
            match &self.puzzle {
                None => {
                    return Err(DomainError::validation(format!(
                        "Puzzle quest '{}' has no puzzle",
                        self.title
                    )))
                }
                Some(puzzle) if puzzle.solution.trim().is_empty() => {
                    return Err(DomainError::validation(format!(
                        "Puzzle quest '{}' has an empty solution",
                        self.title
                    )))
                }
                Some(_) => {}
            }
        }
        Coordinates::new(self.latitude, self.longitude)?;
        Ok(())
    }
}
