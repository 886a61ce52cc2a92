//! Generator output: the immutable content of an adventure.

use serde::{Deserialize, Serialize};

use super::quest::Quest;
use crate::error::DomainError;

/// Country label used when a destination name carries no country segment.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Where an adventure takes place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Destination {
    /// Best-effort country: the text after the last comma of the name.
    ///
    /// `"Colosseum, Rome, Italy"` yields `"Italy"`; a name without a comma,
    /// or with nothing after the last one, yields `"Unknown"`.
    pub fn country(&self) -> String {
        match self.name.rsplit_once(',') {
            Some((_, last)) if !last.trim().is_empty() => last.trim().to_string(),
            _ => UNKNOWN_COUNTRY.to_string(),
        }
    }
}

/// An adventure as produced by the generator, before any progression state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdventureTemplate {
    pub title: String,
    pub intro_narrative: String,
    pub destination: Destination,
    pub quests: Vec<Quest>,
}

impl AdventureTemplate {
    /// Reject templates that cannot be played.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if there are no quests or any quest
    /// breaks its own invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.quests.is_empty() {
            return Err(DomainError::validation(
                "Adventure must contain at least one quest",
            ));
        }
        for quest in &self.quests {
            quest.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::value_objects::quest::fixtures::{photo_quest, puzzle_quest};

    pub fn destination(name: &str) -> Destination {
        Destination {
            name: name.to_string(),
            latitude: 41.8902,
            longitude: 12.4922,
        }
    }

    pub fn template(quests: Vec<Quest>) -> AdventureTemplate {
        AdventureTemplate {
            title: "Echoes of the Arena".to_string(),
            intro_narrative: "Rome remembers those who listen.".to_string(),
            destination: destination("Colosseum, Rome, Italy"),
            quests,
        }
    }

    /// Two quests: a 150-point puzzle solved by "rome", then a default-point photo.
    pub fn two_quest_template() -> AdventureTemplate {
        template(vec![puzzle_quest("rome", Some(150)), photo_quest(None)])
    }
}
