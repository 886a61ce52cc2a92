//! Read-only adventure queries.

use std::sync::Arc;

use echoes_domain::{Coordinates, Progress, Quest, Story, StoryId};

use super::AdventureError;
use crate::infrastructure::ports::AdventureStore;

/// One adventure with everything a screen needs to render it.
#[derive(Debug, Clone)]
pub struct AdventureView {
    pub story: Story,
    pub progress: Progress,
    pub active_quest: Option<Quest>,
    /// Kilometres from the supplied position to the active quest target.
    pub distance_km: Option<f64>,
}

impl AdventureView {
    pub fn new(story: Story, position: Option<Coordinates>) -> Self {
        let distance_km = position.and_then(|p| story.distance_to_active_quest(&p));
        Self {
            progress: story.progress(),
            active_quest: story.active_quest().cloned(),
            distance_km,
            story,
        }
    }
}

/// All adventures, most recently started first.
pub struct ListAdventures {
    store: Arc<dyn AdventureStore>,
}

impl ListAdventures {
    pub fn new(store: Arc<dyn AdventureStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> Result<Vec<Story>, AdventureError> {
        Ok(self.store.load_stories().await?.into_vec())
    }
}

pub struct GetAdventure {
    store: Arc<dyn AdventureStore>,
}

impl GetAdventure {
    pub fn new(store: Arc<dyn AdventureStore>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        id: StoryId,
        position: Option<Coordinates>,
    ) -> Result<AdventureView, AdventureError> {
        let stories = self.store.load_stories().await?;
        let story = stories
            .get(id)
            .cloned()
            .ok_or(AdventureError::NotFound(id))?;
        Ok(AdventureView::new(story, position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockAdventureStore;
    use crate::test_fixtures::rome_story;
    use echoes_domain::{ProgressState, StoryCollection};

    fn store_with(stories: Vec<Story>) -> MockAdventureStore {
        let mut store = MockAdventureStore::new();
        store
            .expect_load_stories()
            .returning(move || Ok(StoryCollection::try_from(stories.clone()).unwrap()));
        store
    }

    #[tokio::test]
    async fn list_keeps_stored_order() {
        let first = rome_story();
        let second = rome_story();
        let (first_id, second_id) = (first.id(), second.id());
        let use_case = ListAdventures::new(Arc::new(store_with(vec![first, second])));

        let stories = use_case.execute().await.unwrap();
        let ids: Vec<_> = stories.iter().map(Story::id).collect();
        assert_eq!(ids, vec![first_id, second_id]);
    }

    #[tokio::test]
    async fn get_reports_progress_and_active_quest() {
        let story = rome_story();
        let id = story.id();
        let use_case = GetAdventure::new(Arc::new(store_with(vec![story])));

        let view = use_case.execute(id, None).await.unwrap();
        assert_eq!(view.progress.state(), ProgressState::NotStarted);
        assert_eq!(view.progress.total, 2);
        assert_eq!(
            view.active_quest.map(|q| q.title),
            Some("The Eternal Riddle".to_string())
        );
        assert!(view.distance_km.is_none());
    }

    #[tokio::test]
    async fn get_with_position_adds_distance() {
        let story = rome_story();
        let id = story.id();
        let use_case = GetAdventure::new(Arc::new(store_with(vec![story])));

        // Piazza Venezia, roughly 1 km from the Arch of Constantine.
        let here = Coordinates::new(41.8959, 12.4823).unwrap();
        let view = use_case.execute(id, Some(here)).await.unwrap();
        let km = view.distance_km.unwrap();
        assert!(km > 0.5 && km < 1.5, "unexpected distance {km}");
    }

    #[tokio::test]
    async fn get_unknown_is_not_found() {
        let use_case = GetAdventure::new(Arc::new(store_with(vec![rome_story()])));
        let err = use_case.execute(StoryId::new(), None).await.unwrap_err();
        assert!(matches!(err, AdventureError::NotFound(_)));
    }
}
