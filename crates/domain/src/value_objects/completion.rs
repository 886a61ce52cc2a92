//! Evidence submitted for a quest and the record kept once it is accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::quest::Quest;

/// What the player handed in to finish the active quest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestEvidence {
    /// A captured image, as a data URL.
    Photo(String),
    /// A typed answer to a puzzle.
    Answer(String),
    /// No payload; only valid for quest types without an evidence rule.
    None,
}

impl QuestEvidence {
    /// Build evidence from the optional wire fields, preferring neither.
    ///
    /// Returns `None` when both a photo and an answer are supplied.
    pub fn from_parts(user_photo: Option<String>, user_answer: Option<String>) -> Option<Self> {
        match (user_photo, user_answer) {
            (Some(_), Some(_)) => None,
            (Some(photo), None) => Some(Self::Photo(photo)),
            (None, Some(answer)) => Some(Self::Answer(answer)),
            (None, None) => Some(Self::None),
        }
    }

    pub fn photo(&self) -> Option<&str> {
        match self {
            Self::Photo(photo) => Some(photo),
            _ => None,
        }
    }

    pub fn answer(&self) -> Option<&str> {
        match self {
            Self::Answer(answer) => Some(answer),
            _ => None,
        }
    }
}

/// Where a quest was completed, copied from its target at acceptance time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub country: String,
}

/// Immutable record of one accepted quest completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedQuest {
    pub quest: Quest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
    pub completed_date: DateTime<Utc>,
    pub location: CompletionLocation,
}

impl CompletedQuest {
    pub(crate) fn record(
        quest: &Quest,
        evidence: QuestEvidence,
        country: String,
        now: DateTime<Utc>,
    ) -> Self {
        let (user_photo, user_answer) = match evidence {
            QuestEvidence::Photo(photo) => (Some(photo), None),
            QuestEvidence::Answer(answer) => (None, Some(answer)),
            QuestEvidence::None => (None, None),
        };
        Self {
            quest: quest.clone(),
            user_photo,
            user_answer,
            completed_date: now,
            location: CompletionLocation {
                latitude: quest.latitude,
                longitude: quest.longitude,
                name: quest.target_location_name.clone(),
                country,
            },
        }
    }
}
