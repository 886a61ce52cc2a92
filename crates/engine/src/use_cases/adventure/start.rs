//! Start a new adventure at a place the player names.

use std::sync::Arc;

use echoes_domain::{create_adventure, Story};

use super::AdventureError;
use crate::infrastructure::ports::{AdventureGeneratorPort, AdventureStore, ClockPort};
use crate::use_cases::{load_profile_or_default, ProgressLock};

/// Generate an adventure and add it to the front of the player's list.
///
/// Generation happens before the lock is taken; a slow model never blocks
/// quest completions. A failed generation changes nothing.
pub struct StartAdventure {
    store: Arc<dyn AdventureStore>,
    generator: Arc<dyn AdventureGeneratorPort>,
    clock: Arc<dyn ClockPort>,
    lock: ProgressLock,
    default_language: String,
}

impl StartAdventure {
    pub fn new(
        store: Arc<dyn AdventureStore>,
        generator: Arc<dyn AdventureGeneratorPort>,
        clock: Arc<dyn ClockPort>,
        lock: ProgressLock,
        default_language: impl Into<String>,
    ) -> Self {
        Self {
            store,
            generator,
            clock,
            lock,
            default_language: default_language.into(),
        }
    }

    pub async fn execute(
        &self,
        location: &str,
        language: Option<&str>,
    ) -> Result<Story, AdventureError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(AdventureError::Validation(
                "Location cannot be empty".to_string(),
            ));
        }
        let language = language
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(self.default_language.as_str());

        let template = match self.generator.generate(location, language).await {
            Ok(template) => template,
            Err(e) => {
                tracing::error!(location = %location, error = %e, "Adventure generation failed");
                return Err(e.into());
            }
        };

        let _guard = self.lock.lock().await;
        let now = self.clock.now();
        let mut stories = self.store.load_stories().await?;
        let mut profile = load_profile_or_default(self.store.as_ref(), now).await?;

        let story = create_adventure(&mut stories, &mut profile, template, location, now)?;
        self.store.commit(&stories, &profile).await?;

        tracing::info!(
            story_id = %story.id(),
            location = %location,
            quests = story.quests().len(),
            "Adventure started"
        );
        Ok(story)
    }
}
