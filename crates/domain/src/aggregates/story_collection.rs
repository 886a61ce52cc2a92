//! The player's adventures, most recent first.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::StoryId;

use super::story::Story;

/// Ordered collection of stories. New adventures go to the front.
///
/// Story ids are unique; decoding a list that repeats one is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Story>", into = "Vec<Story>")]
pub struct StoryCollection(Vec<Story>);

impl StoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new story ahead of every existing one.
    pub fn prepend(&mut self, story: Story) {
        self.0.insert(0, story);
    }

    pub fn get(&self, id: StoryId) -> Option<&Story> {
        self.0.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: StoryId) -> Option<&mut Story> {
        self.0.iter_mut().find(|s| s.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Story> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<Story> {
        self.0
    }
}

impl TryFrom<Vec<Story>> for StoryCollection {
    type Error = DomainError;

    fn try_from(stories: Vec<Story>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(stories.len());
        for story in &stories {
            if !seen.insert(story.id()) {
                return Err(DomainError::invariant(format!(
                    "story {} appears more than once",
                    story.id()
                )));
            }
        }
        Ok(Self(stories))
    }
}

impl From<StoryCollection> for Vec<Story> {
    fn from(stories: StoryCollection) -> Self {
        stories.0
    }
}
