//! In-memory adventure storage.
//!
//! Keeps the encoded envelopes rather than live values so the same
//! decode path runs as with SQLite. Used for `ECHOES_DB=:memory:` and tests.

use async_trait::async_trait;
use echoes_domain::{StoryCollection, UserProfile};
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::envelope::{self, ADVENTURES_KEY, PROFILE_KEY};
use crate::infrastructure::ports::{AdventureStore, RepoError};

#[derive(Default)]
pub struct InMemoryAdventureStore {
    slots: RwLock<HashMap<&'static str, String>>,
}

impl InMemoryAdventureStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdventureStore for InMemoryAdventureStore {
    async fn load_stories(&self) -> Result<StoryCollection, RepoError> {
        let slots = self.slots.read().await;
        match slots.get(ADVENTURES_KEY) {
            Some(json) => envelope::decode(json),
            None => Ok(StoryCollection::new()),
        }
    }

    async fn load_profile(&self) -> Result<Option<UserProfile>, RepoError> {
        let slots = self.slots.read().await;
        slots
            .get(PROFILE_KEY)
            .map(|json| envelope::decode(json))
            .transpose()
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<(), RepoError> {
        let json = envelope::encode(profile)?;
        self.slots.write().await.insert(PROFILE_KEY, json);
        Ok(())
    }

    async fn commit(
        &self,
        stories: &StoryCollection,
        profile: &UserProfile,
    ) -> Result<(), RepoError> {
        let stories_json = envelope::encode(stories)?;
        let profile_json = envelope::encode(profile)?;

        let mut slots = self.slots.write().await;
        slots.insert(ADVENTURES_KEY, stories_json);
        slots.insert(PROFILE_KEY, profile_json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn missing_slots_read_as_empty() {
        let store = InMemoryAdventureStore::new();
        assert!(store.load_stories().await.unwrap().is_empty());
        assert!(store.load_profile().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn commit_then_load() {
        let store = InMemoryAdventureStore::new();
        let mut profile = UserProfile::default_at(Utc::now());
        profile.record_visited_city("Lisbon");

        store.commit(&StoryCollection::new(), &profile).await.unwrap();

        assert_eq!(store.load_profile().await.unwrap(), Some(profile));
        assert!(store.load_stories().await.unwrap().is_empty());
    }
}
