//! Adventure progression across both aggregates.
//!
//! These functions are the whole state machine: creating an adventure,
//! completing its active quest, and folding the reward into the profile.
//! They mutate in memory only; persisting the result as one unit is the
//! caller's job.

use chrono::{DateTime, Utc};

use crate::aggregates::{Story, StoryCollection, UserProfile};
use crate::error::{CompletionError, DomainError};
use crate::ids::StoryId;
use crate::value_objects::{AdventureTemplate, QuestEvidence, RewardDelta, RewardSource};

/// Errors from [`complete_and_reward`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error("Story not found: {0}")]
    StoryNotFound(StoryId),
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// Result of an accepted quest completion.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestCompletion {
    pub story: Story,
    pub reward: RewardDelta,
}

/// Wrap `template` in a new story, put it at the front of `stories`, and
/// record `destination_location_name` as visited.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a template with no quests; nothing
/// is modified in that case.
pub fn create_adventure(
    stories: &mut StoryCollection,
    profile: &mut UserProfile,
    template: AdventureTemplate,
    destination_location_name: &str,
    now: DateTime<Utc>,
) -> Result<Story, DomainError> {
    let story = Story::from_template(template, now)?;
    stories.prepend(story.clone());
    profile.record_visited_city(destination_location_name);
    Ok(story)
}

/// Complete the active quest of story `id` and apply its reward as a quest reward.
///
/// With `expected_index` set, the completion only goes through if that quest
/// is still the active one. On any error neither `stories` nor `profile` is
/// modified.
pub fn complete_and_reward(
    stories: &mut StoryCollection,
    profile: &mut UserProfile,
    id: StoryId,
    expected_index: Option<usize>,
    evidence: QuestEvidence,
    now: DateTime<Utc>,
) -> Result<QuestCompletion, ProgressionError> {
    let story = stories.get_mut(id).ok_or(ProgressionError::StoryNotFound(id))?;
    let reward = match expected_index {
        Some(expected) => story.complete_quest_at(expected, evidence, now)?,
        None => story.complete_current_quest(evidence, now)?,
    };
    let story = story.clone();
    profile.apply_reward(reward, &RewardSource::Quest);
    Ok(QuestCompletion { story, reward })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::template::fixtures::two_quest_template;
    use crate::value_objects::ProgressState;

    fn setup() -> (StoryCollection, UserProfile) {
        (StoryCollection::new(), UserProfile::default_at(Utc::now()))
    }

    #[test]
    fn create_prepends_and_records_city() {
        let (mut stories, mut profile) = setup();
        let first = create_adventure(&mut stories, &mut profile, two_quest_template(), "Rome", Utc::now()).unwrap();
        let second = create_adventure(&mut stories, &mut profile, two_quest_template(), "Rome", Utc::now()).unwrap();

        assert_eq!(stories.len(), 2);
        assert_eq!(stories.iter().next().unwrap().id(), second.id());
        assert_ne!(first.id(), second.id());
        assert_eq!(profile.visited_cities(), ["Rome".to_string()]);
    }

    #[test]
    fn create_with_empty_template_changes_nothing() {
        let (mut stories, mut profile) = setup();
        let mut template = two_quest_template();
        template.quests.clear();

        let result = create_adventure(&mut stories, &mut profile, template, "Rome", Utc::now());
        assert!(result.is_err());
        assert!(stories.is_empty());
        assert!(profile.visited_cities().is_empty());
    }

    #[test]
    fn unknown_story_is_reported() {
        let (mut stories, mut profile) = setup();
        let id = StoryId::new();
        let err = complete_and_reward(&mut stories, &mut profile, id, None, QuestEvidence::None, Utc::now())
            .unwrap_err();
        assert_eq!(err, ProgressionError::StoryNotFound(id));
    }

    #[test]
    fn failed_attempt_leaves_both_aggregates_untouched() {
        let (mut stories, mut profile) = setup();
        let story = create_adventure(&mut stories, &mut profile, two_quest_template(), "Rome", Utc::now()).unwrap();
        let stories_before = stories.clone();
        let profile_before = profile.clone();

        let err = complete_and_reward(
            &mut stories,
            &mut profile,
            story.id(),
            None,
            QuestEvidence::Answer("Milan".into()),
            Utc::now(),
        )
        .unwrap_err();

        assert_eq!(err, ProgressionError::Completion(CompletionError::IncorrectAnswer));
        assert_eq!(stories, stories_before);
        assert_eq!(profile, profile_before);
    }

    #[test]
    fn end_to_end_two_quest_adventure() {
        let (mut stories, mut profile) = setup();
        let story = create_adventure(&mut stories, &mut profile, two_quest_template(), "Rome, Italy", Utc::now()).unwrap();

        let first = complete_and_reward(
            &mut stories,
            &mut profile,
            story.id(),
            Some(0),
            QuestEvidence::Answer("Rome".into()),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(first.reward.points, 150);
        assert_eq!(first.story.current_quest_index(), 1);
        assert_eq!(first.story.completed_quests().len(), 1);

        let second = complete_and_reward(
            &mut stories,
            &mut profile,
            story.id(),
            Some(1),
            QuestEvidence::Photo("data:image/jpeg;base64,/9j/4AAQ".into()),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(second.reward.points, 100);
        assert_eq!(second.story.current_quest_index(), 2);
        assert_eq!(second.story.progress().state(), ProgressState::Complete);

        assert_eq!(profile.total_points(), 250);
        assert_eq!(profile.level(), 1);
        assert_eq!(profile.completed_quests(), 2);
        assert_eq!(stories.get(story.id()).unwrap(), &second.story);
    }
}
