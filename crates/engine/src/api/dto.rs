//! Request and response bodies for the HTTP API (JSON, camelCase).

use echoes_domain::{Progress, ProgressState, Quest, RewardDelta, Story, UserProfile};
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::PlaceDescription;
use crate::use_cases::{AdventureView, ProfileUpdate, QuestOutcome};

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAdventureRequest {
    pub location: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteQuestRequest {
    #[serde(default)]
    pub expected_quest_index: Option<usize>,
    #[serde(default)]
    pub user_photo: Option<String>,
    #[serde(default)]
    pub user_answer: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub favorite_locations: Option<Vec<String>>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            name: req.name,
            avatar: req.avatar,
            interests: req.interests,
            favorite_locations: req.favorite_locations,
        }
    }
}

/// Optional client position, `?lat=..&lng=..`.
#[derive(Debug, Default, Deserialize)]
pub struct PositionQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDto {
    pub current: usize,
    pub total: usize,
    pub percent: u8,
    pub state: ProgressState,
}

impl From<Progress> for ProgressDto {
    fn from(progress: Progress) -> Self {
        Self {
            current: progress.current,
            total: progress.total,
            percent: progress.percent(),
            state: progress.state(),
        }
    }
}

/// A story as stored, plus derived fields for display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdventureResponse {
    #[serde(flatten)]
    pub story: Story,
    pub progress: ProgressDto,
    pub active_quest: Option<Quest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl From<AdventureView> for AdventureResponse {
    fn from(view: AdventureView) -> Self {
        Self {
            progress: view.progress.into(),
            active_quest: view.active_quest,
            distance_km: view.distance_km,
            story: view.story,
        }
    }
}

impl From<Story> for AdventureResponse {
    fn from(story: Story) -> Self {
        AdventureView::new(story, None).into()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestCompletedResponse {
    pub adventure: AdventureResponse,
    pub reward: RewardDelta,
    pub profile: UserProfile,
}

impl From<QuestOutcome> for QuestCompletedResponse {
    fn from(outcome: QuestOutcome) -> Self {
        Self {
            adventure: outcome.story.into(),
            reward: outcome.reward,
            profile: outcome.profile,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceResponse {
    pub label: String,
    #[serde(flatten)]
    pub place: PlaceDescription,
}

impl From<PlaceDescription> for PlaceResponse {
    fn from(place: PlaceDescription) -> Self {
        Self {
            label: place.label(),
            place,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
