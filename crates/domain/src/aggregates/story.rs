//! Story aggregate - one player's run through a generated adventure
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: progression state can only move through
//!   [`Story::complete_current_quest`]
//! - **Valid by construction**: [`Story::from_template`] rejects unplayable templates
//! - **Strict decoding**: deserialization re-checks every invariant

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CompletionError, DomainError};
use crate::ids::StoryId;
use crate::value_objects::{
    AdventureTemplate, CompletedQuest, Coordinates, Destination, Progress, Quest, QuestEvidence,
    QuestType, RewardDelta,
};

/// An adventure instance: generated content plus progression state.
///
/// # Invariants
///
/// - `quests` is non-empty and immutable after creation
/// - `current_quest_index` is in `0..=quests.len()`
/// - `completed_quests.len() == current_quest_index`
///
/// # Example
///
/// ```ignore
/// let mut story = Story::from_template(template, now)?;
/// let reward = story.complete_current_quest(QuestEvidence::Answer("rome".into()), now)?;
/// assert_eq!(story.progress().current, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    id: StoryId,
    title: String,
    intro_narrative: String,
    destination: Destination,
    quests: Vec<Quest>,
    current_quest_index: usize,
    completed_quests: Vec<CompletedQuest>,
    created_at: DateTime<Utc>,
}

impl Story {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Wrap a generated template with fresh progression state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the template has no quests or a
    /// puzzle quest without a solution.
    pub fn from_template(template: AdventureTemplate, now: DateTime<Utc>) -> Result<Self, DomainError> {
        template.validate()?;
        let AdventureTemplate {
            title,
            intro_narrative,
            destination,
            quests,
        } = template;

        Ok(Self {
            id: StoryId::new(),
            title,
            intro_narrative,
            destination,
            quests,
            current_quest_index: 0,
            completed_quests: Vec::new(),
            created_at: now,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> StoryId {
        self.id
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn intro_narrative(&self) -> &str {
        &self.intro_narrative
    }

    #[inline]
    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    #[inline]
    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    #[inline]
    pub fn current_quest_index(&self) -> usize {
        self.current_quest_index
    }

    #[inline]
    pub fn completed_quests(&self) -> &[CompletedQuest] {
        &self.completed_quests
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // =========================================================================
    // Derived queries
    // =========================================================================

    pub fn progress(&self) -> Progress {
        Progress::new(self.current_quest_index, self.quests.len())
    }

    pub fn is_complete(&self) -> bool {
        self.progress().is_complete()
    }

    /// The quest the player is working on, or `None` once the story is complete.
    pub fn active_quest(&self) -> Option<&Quest> {
        self.quests.get(self.current_quest_index)
    }

    /// Kilometres from `position` to the active quest's target.
    pub fn distance_to_active_quest(&self, position: &Coordinates) -> Option<f64> {
        self.active_quest()
            .map(|quest| position.distance_km(&quest.target()))
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Complete the active quest with the given evidence.
    ///
    /// On success the completion is recorded, the pointer advances by exactly
    /// one, and the reward for the quest is returned. On failure the story is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// - `AlreadyComplete` if no quest remains
    /// - `MissingEvidence` if a photo quest gets no (or a blank) photo
    /// - `IncorrectAnswer` if a puzzle quest gets a non-matching answer
    pub fn complete_current_quest(
        &mut self,
        evidence: QuestEvidence,
        now: DateTime<Utc>,
    ) -> Result<RewardDelta, CompletionError> {
        let quest = self
            .active_quest()
            .ok_or(CompletionError::AlreadyComplete)?;
        check_evidence(quest, &evidence)?;

        let record = CompletedQuest::record(quest, evidence, self.destination.country(), now);
        let reward = RewardDelta::new(quest.reward_points());

        self.completed_quests.push(record);
        self.current_quest_index += 1;
        Ok(reward)
    }

    /// Like [`Story::complete_current_quest`], but only if `expected_index` is
    /// still the active quest.
    ///
    /// # Errors
    ///
    /// `StaleProgress` when the story has already moved past `expected_index`
    /// (or has not reached it), in addition to the errors of
    /// [`Story::complete_current_quest`].
    pub fn complete_quest_at(
        &mut self,
        expected_index: usize,
        evidence: QuestEvidence,
        now: DateTime<Utc>,
    ) -> Result<RewardDelta, CompletionError> {
        if expected_index != self.current_quest_index {
            return Err(CompletionError::StaleProgress {
                expected: expected_index,
                actual: self.current_quest_index,
            });
        }
        self.complete_current_quest(evidence, now)
    }

    fn check_invariants(&self) -> Result<(), DomainError> {
        if self.quests.is_empty() {
            return Err(DomainError::invariant(format!(
                "story {} has no quests",
                self.id
            )));
        }
        for quest in &self.quests {
            quest.validate().map_err(|e| {
                DomainError::invariant(format!("story {} has an invalid quest: {}", self.id, e))
            })?;
        }
        if self.current_quest_index > self.quests.len() {
            return Err(DomainError::invariant(format!(
                "story {} quest index {} exceeds {} quests",
                self.id,
                self.current_quest_index,
                self.quests.len()
            )));
        }
        if self.completed_quests.len() != self.current_quest_index {
            return Err(DomainError::invariant(format!(
                "story {} records {} completions at quest index {}",
                self.id,
                self.completed_quests.len(),
                self.current_quest_index
            )));
        }
        Ok(())
    }
}

/// Navigation, audio story and exploration quests have no evidence rule and
/// accept anything, including no evidence at all.
fn check_evidence(quest: &Quest, evidence: &QuestEvidence) -> Result<(), CompletionError> {
    match quest.quest_type {
        QuestType::Photo => match evidence.photo() {
            Some(photo) if !photo.trim().is_empty() => Ok(()),
            _ => Err(CompletionError::MissingEvidence),
        },
        QuestType::Puzzle => {
            let solved = match (&quest.puzzle, evidence.answer()) {
                (Some(puzzle), Some(answer)) => puzzle.is_solved_by(answer),
                _ => false,
            };
            if solved {
                Ok(())
            } else {
                Err(CompletionError::IncorrectAnswer)
            }
        }
        QuestType::Navigation | QuestType::AudioStory | QuestType::Exploration => Ok(()),
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Intermediate format for serialization that matches the stored format
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct StoryWireFormat {
    id: StoryId,
    title: String,
    intro_narrative: String,
    destination: Destination,
    quests: Vec<Quest>,
    current_quest_index: usize,
    completed_quests: Vec<CompletedQuest>,
    created_at: DateTime<Utc>,
}

impl Serialize for Story {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wire = StoryWireFormat {
            id: self.id,
            title: self.title.clone(),
            intro_narrative: self.intro_narrative.clone(),
            destination: self.destination.clone(),
            quests: self.quests.clone(),
            current_quest_index: self.current_quest_index,
            completed_quests: self.completed_quests.clone(),
            created_at: self.created_at,
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Story {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = StoryWireFormat::deserialize(deserializer)?;

        let story = Story {
            id: wire.id,
            title: wire.title,
            intro_narrative: wire.intro_narrative,
            destination: wire.destination,
            quests: wire.quests,
            current_quest_index: wire.current_quest_index,
            completed_quests: wire.completed_quests,
            created_at: wire.created_at,
        };
        story.check_invariants().map_err(serde::de::Error::custom)?;
        Ok(story)
    }
}

// ============================================================================
// Tests
// ============================================================================
