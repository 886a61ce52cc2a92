//! Echoes domain: the adventure progression model.
//!
//! Pure types and transitions, no I/O. Time is passed in as `DateTime<Utc>`
//! so every transition is deterministic under test.

pub mod aggregates;
pub mod error;
pub mod ids;
pub mod progression;
pub mod value_objects;

pub use aggregates::{Story, StoryCollection, UserProfile};
pub use error::{CompletionError, DomainError};
pub use ids::StoryId;
pub use progression::{complete_and_reward, create_adventure, ProgressionError, QuestCompletion};
pub use value_objects::{
    level_for_points, Achievement, AdventureTemplate, Badge, CompletedQuest, CompletionLocation,
    Coordinates, Destination, ExplorerName, Progress, ProgressState, Puzzle, Quest, QuestEvidence,
    QuestType, RewardDelta, RewardSource, DEFAULT_QUEST_POINTS, POINTS_PER_LEVEL,
};
