//! Adventure use cases: start, complete quests, and read back.

mod complete_quest;
mod error;
mod start;
mod view;

use std::sync::Arc;

pub use complete_quest::{CompleteQuest, QuestOutcome};
pub use error::AdventureError;
pub use start::StartAdventure;
pub use view::{AdventureView, GetAdventure, ListAdventures};

/// Container for adventure use cases.
pub struct AdventureUseCases {
    pub start: Arc<StartAdventure>,
    pub complete_quest: Arc<CompleteQuest>,
    pub list: Arc<ListAdventures>,
    pub get: Arc<GetAdventure>,
}

impl AdventureUseCases {
    pub fn new(
        start: Arc<StartAdventure>,
        complete_quest: Arc<CompleteQuest>,
        list: Arc<ListAdventures>,
        get: Arc<GetAdventure>,
    ) -> Self {
        Self {
            start,
            complete_quest,
            list,
            get,
        }
    }
}
