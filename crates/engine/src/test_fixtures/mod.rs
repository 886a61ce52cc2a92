//! Common test helpers: adventure templates and a fixed clock time.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{rome_template, fixed_now};
//!
//! let story = Story::from_template(rome_template(), fixed_now()).unwrap();
//! ```

use chrono::{DateTime, TimeZone, Utc};
use echoes_domain::{AdventureTemplate, Destination, Puzzle, Quest, QuestType, Story};

/// A stable instant for tests that compare timestamps.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).unwrap()
}

/// Two quests: a 150-point puzzle solved by "rome", then a photo quest
/// worth the default 100 points.
pub fn rome_template() -> AdventureTemplate {
    AdventureTemplate {
        title: "Echoes of the Forum".into(),
        intro_narrative: "Two thousand years whisper from the stones.".into(),
        destination: Destination {
            name: "Colosseum, Rome, Italy".into(),
            latitude: 41.8902,
            longitude: 12.4922,
        },
        quests: vec![
            Quest {
                title: "The Eternal Riddle".into(),
                description: "Answer the gatekeeper".into(),
                narrative: "A voice asks the name of this city.".into(),
                quest_type: QuestType::Puzzle,
                target_location_name: "Arch of Constantine".into(),
                latitude: 41.8898,
                longitude: 12.4906,
                puzzle: Some(Puzzle {
                    prompt: "Which city was not built in a day?".into(),
                    solution: "Rome".into(),
                    hint: None,
                }),
                points: Some(150),
            },
            Quest {
                title: "Arena at Dusk".into(),
                description: "Photograph the arena".into(),
                narrative: "The light turns gold.".into(),
                quest_type: QuestType::Photo,
                target_location_name: "Colosseum".into(),
                latitude: 41.8902,
                longitude: 12.4922,
                puzzle: None,
                points: None,
            },
        ],
    }
}

/// A fresh story built from [`rome_template`].
pub fn rome_story() -> Story {
    Story::from_template(rome_template(), fixed_now()).unwrap()
}
