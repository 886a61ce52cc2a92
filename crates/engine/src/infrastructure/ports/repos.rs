//! Storage port for the two persisted aggregates.

use async_trait::async_trait;
use echoes_domain::{StoryCollection, UserProfile};

use super::error::RepoError;

/// Key-value style storage with two slots: the story list and the profile.
///
/// A missing story slot reads as an empty collection and a missing profile
/// as `None`; the caller decides what a default profile looks like.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdventureStore: Send + Sync {
    async fn load_stories(&self) -> Result<StoryCollection, RepoError>;
    async fn load_profile(&self) -> Result<Option<UserProfile>, RepoError>;
    async fn save_profile(&self, profile: &UserProfile) -> Result<(), RepoError>;

    /// Write both aggregates as one unit. Either both are stored or neither is.
    async fn commit(&self, stories: &StoryCollection, profile: &UserProfile)
        -> Result<(), RepoError>;
}
