//! Aggregates - the two persisted roots of the progression model.

pub mod story;
pub mod story_collection;
pub mod user_profile;

pub use story::Story;
pub use story_collection::StoryCollection;
pub use user_profile::UserProfile;
