//! Complete the active quest of an adventure and bank its reward.

use std::sync::Arc;

use echoes_domain::{
    complete_and_reward, CompletionError, QuestEvidence, RewardDelta, Story, StoryId, UserProfile,
};

use super::AdventureError;
use crate::infrastructure::ports::{AdventureStore, ClockPort};
use crate::use_cases::{load_profile_or_default, ProgressLock};

/// Result of an accepted completion: the updated story, what it paid and
/// the profile after the reward.
#[derive(Debug, Clone)]
pub struct QuestOutcome {
    pub story: Story,
    pub reward: RewardDelta,
    pub profile: UserProfile,
}

pub struct CompleteQuest {
    store: Arc<dyn AdventureStore>,
    clock: Arc<dyn ClockPort>,
    lock: ProgressLock,
}

impl CompleteQuest {
    pub fn new(store: Arc<dyn AdventureStore>, clock: Arc<dyn ClockPort>, lock: ProgressLock) -> Self {
        Self { store, clock, lock }
    }

    /// Submit `evidence` for the active quest of `story_id`.
    ///
    /// With `expected_quest_index` set, the submission only counts if that
    /// quest is still active; a replayed request gets `StaleProgress`
    /// instead of a second reward. Story and profile are committed together.
    pub async fn execute(
        &self,
        story_id: StoryId,
        expected_quest_index: Option<usize>,
        evidence: QuestEvidence,
    ) -> Result<QuestOutcome, AdventureError> {
        let _guard = self.lock.lock().await;
        let now = self.clock.now();
        let mut stories = self.store.load_stories().await?;
        let mut profile = load_profile_or_default(self.store.as_ref(), now).await?;

        let completion = match complete_and_reward(
            &mut stories,
            &mut profile,
            story_id,
            expected_quest_index,
            evidence,
            now,
        ) {
            Ok(completion) => completion,
            Err(e) => {
                let e = AdventureError::from(e);
                match &e {
                    AdventureError::Completion(CompletionError::AlreadyComplete) => {
                        tracing::warn!(story_id = %story_id, "Completion submitted for a finished adventure");
                    }
                    other => {
                        tracing::debug!(story_id = %story_id, error = %other, "Quest completion rejected");
                    }
                }
                return Err(e);
            }
        };

        self.store.commit(&stories, &profile).await?;

        tracing::info!(
            story_id = %story_id,
            quest_index = completion.story.current_quest_index(),
            points = completion.reward.points,
            total_points = profile.total_points(),
            level = profile.level(),
            "Quest completed"
        );

        Ok(QuestOutcome {
            story: completion.story,
            reward: completion.reward,
            profile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockAdventureStore, MockClockPort, RepoError};
    use crate::test_fixtures::{fixed_now, rome_story};
    use crate::use_cases::new_progress_lock;
    use echoes_domain::StoryCollection;

    fn clock() -> MockClockPort {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(fixed_now);
        clock
    }

    fn store_with(story: Story) -> MockAdventureStore {
        let mut store = MockAdventureStore::new();
        store
            .expect_load_stories()
            .returning(move || Ok(StoryCollection::try_from(vec![story.clone()]).unwrap()));
        store.expect_load_profile().returning(|| Ok(None));
        store
    }

    mod accepted {
        use super::*;

        #[tokio::test]
        async fn puzzle_answer_advances_and_rewards() {
            let story = rome_story();
            let id = story.id();
            let mut store = store_with(story);
            store
                .expect_commit()
                .withf(move |stories, profile| {
                    stories.get(id).map(|s| s.current_quest_index()) == Some(1)
                        && profile.total_points() == 150
                        && profile.completed_quests() == 1
                })
                .times(1)
                .returning(|_, _| Ok(()));

            let use_case = CompleteQuest::new(Arc::new(store), Arc::new(clock()), new_progress_lock());
            let outcome = use_case
                .execute(id, Some(0), QuestEvidence::Answer("  ROME ".into()))
                .await
                .unwrap();

            assert_eq!(outcome.reward.points, 150);
            assert_eq!(outcome.profile.level(), 1);
            let record = &outcome.story.completed_quests()[0];
            assert_eq!(record.user_answer.as_deref(), Some("  ROME "));
            assert_eq!(record.location.country, "Italy");
            assert_eq!(record.completed_date, fixed_now());
        }

        #[tokio::test]
        async fn without_expected_index_completes_current() {
            let story = rome_story();
            let id = story.id();
            let mut store = store_with(story);
            store.expect_commit().returning(|_, _| Ok(()));

            let use_case = CompleteQuest::new(Arc::new(store), Arc::new(clock()), new_progress_lock());
            let outcome = use_case
                .execute(id, None, QuestEvidence::Answer("rome".into()))
                .await
                .unwrap();
            assert_eq!(outcome.story.current_quest_index(), 1);
        }
    }

    mod rejected {
        use super::*;

        #[tokio::test]
        async fn wrong_answer_commits_nothing() {
            let story = rome_story();
            let id = story.id();
            let mut store = store_with(story);
            store.expect_commit().never();

            let use_case = CompleteQuest::new(Arc::new(store), Arc::new(clock()), new_progress_lock());
            let err = use_case
                .execute(id, None, QuestEvidence::Answer("Paris".into()))
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                AdventureError::Completion(CompletionError::IncorrectAnswer)
            ));
        }

        #[tokio::test]
        async fn stale_index_commits_nothing() {
            let story = rome_story();
            let id = story.id();
            let mut store = store_with(story);
            store.expect_commit().never();

            let use_case = CompleteQuest::new(Arc::new(store), Arc::new(clock()), new_progress_lock());
            let err = use_case
                .execute(id, Some(1), QuestEvidence::Answer("rome".into()))
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                AdventureError::Completion(CompletionError::StaleProgress {
                    expected: 1,
                    actual: 0
                })
            ));
        }

        #[tokio::test]
        async fn unknown_story_is_not_found() {
            let mut store = store_with(rome_story());
            store.expect_commit().never();

            let use_case = CompleteQuest::new(Arc::new(store), Arc::new(clock()), new_progress_lock());
            let missing = StoryId::new();
            let err = use_case
                .execute(missing, None, QuestEvidence::None)
                .await
                .unwrap_err();
            assert!(matches!(err, AdventureError::NotFound(id) if id == missing));
        }

        #[tokio::test]
        async fn commit_failure_surfaces_as_repo_error() {
            let story = rome_story();
            let id = story.id();
            let mut store = store_with(story);
            store
                .expect_commit()
                .returning(|_, _| Err(RepoError::database("commit", "locked")));

            let use_case = CompleteQuest::new(Arc::new(store), Arc::new(clock()), new_progress_lock());
            let err = use_case
                .execute(id, None, QuestEvidence::Answer("rome".into()))
                .await
                .unwrap_err();
            assert!(matches!(err, AdventureError::Repo(_)));
        }
    }

    mod end_to_end {
        use super::*;
        use crate::infrastructure::persistence::InMemoryAdventureStore;
        use crate::test_fixtures::rome_template;
        use crate::use_cases::StartAdventure;
        use crate::infrastructure::ports::MockAdventureGeneratorPort;

        #[tokio::test]
        async fn two_quest_adventure_pays_250_points() {
            let store: Arc<dyn AdventureStore> = Arc::new(InMemoryAdventureStore::new());
            let lock = new_progress_lock();
            let mut generator = MockAdventureGeneratorPort::new();
            generator
                .expect_generate()
                .returning(|_, _| Ok(rome_template()));

            let start = StartAdventure::new(
                store.clone(),
                Arc::new(generator),
                Arc::new(clock()),
                lock.clone(),
                "en",
            );
            let complete = CompleteQuest::new(store.clone(), Arc::new(clock()), lock);

            let story = start.execute("Rome", None).await.unwrap();
            complete
                .execute(story.id(), Some(0), QuestEvidence::Answer("rome".into()))
                .await
                .unwrap();

            // A replay of the first submission is refused.
            let replay = complete
                .execute(story.id(), Some(0), QuestEvidence::Answer("rome".into()))
                .await;
            assert!(replay.is_err());

            let outcome = complete
                .execute(
                    story.id(),
                    Some(1),
                    QuestEvidence::Photo("data:image/jpeg;base64,AAAA".into()),
                )
                .await
                .unwrap();

            assert!(outcome.story.is_complete());
            assert_eq!(outcome.profile.total_points(), 250);
            assert_eq!(outcome.profile.level(), 1);
            assert_eq!(outcome.profile.completed_quests(), 2);

            let finished = complete
                .execute(story.id(), None, QuestEvidence::None)
                .await
                .unwrap_err();
            assert!(matches!(
                finished,
                AdventureError::Completion(CompletionError::AlreadyComplete)
            ));

            let stored = store.load_profile().await.unwrap().unwrap();
            assert_eq!(stored.total_points(), 250);
            assert_eq!(stored.visited_cities(), ["Rome".to_string()]);
        }
    }
}
