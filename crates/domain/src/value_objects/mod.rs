//! Value objects: immutable data with validation at construction.

pub mod completion;
pub mod geo;
pub mod names;
pub mod progress;
pub mod quest;
pub mod recognition;
pub mod reward;
pub mod template;

pub use completion::{CompletedQuest, CompletionLocation, QuestEvidence};
pub use geo::{Coordinates, EARTH_RADIUS_KM};
pub use names::{ExplorerName, DEFAULT_EXPLORER_NAME};
pub use progress::{Progress, ProgressState};
pub use quest::{Puzzle, Quest, QuestType, DEFAULT_QUEST_POINTS};
pub use recognition::{Achievement, Badge};
pub use reward::{level_for_points, RewardDelta, RewardSource, POINTS_PER_LEVEL};
pub use template::{AdventureTemplate, Destination, UNKNOWN_COUNTRY};
