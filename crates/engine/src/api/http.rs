//! HTTP routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use echoes_domain::{Coordinates, QuestEvidence, StoryId, UserProfile};
use serde::Deserialize;
use std::sync::Arc;

use super::dto::{
    AdventureResponse, CompleteQuestRequest, ErrorBody, PlaceResponse, PositionQuery,
    QuestCompletedResponse, StartAdventureRequest, UpdateProfileRequest,
};
use crate::app::App;
use crate::use_cases::{AdventureError, LocationError, ProfileError};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/adventures", get(list_adventures).post(start_adventure))
        .route("/api/adventures/{id}", get(get_adventure))
        .route("/api/adventures/{id}/complete", post(complete_quest))
        .route("/api/profile", get(get_profile).put(update_profile))
        .route("/api/geocode/reverse", get(reverse_geocode))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Adventures
// =============================================================================

async fn list_adventures(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<AdventureResponse>>, ApiError> {
    let stories = app.use_cases.adventure.list.execute().await?;
    Ok(Json(stories.into_iter().map(AdventureResponse::from).collect()))
}

async fn start_adventure(
    State(app): State<Arc<App>>,
    Json(req): Json<StartAdventureRequest>,
) -> Result<(StatusCode, Json<AdventureResponse>), ApiError> {
    let story = app
        .use_cases
        .adventure
        .start
        .execute(&req.location, req.language.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(story.into())))
}

async fn get_adventure(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    Query(query): Query<PositionQuery>,
) -> Result<Json<AdventureResponse>, ApiError> {
    let id = parse_story_id(&id)?;
    let position = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => Some(
            Coordinates::new(lat, lng).map_err(|e| ApiError::Unprocessable(e.to_string()))?,
        ),
        (None, None) => None,
        _ => {
            return Err(ApiError::BadRequest(
                "lat and lng must be given together".to_string(),
            ))
        }
    };

    let view = app.use_cases.adventure.get.execute(id, position).await?;
    Ok(Json(view.into()))
}

async fn complete_quest(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    Json(req): Json<CompleteQuestRequest>,
) -> Result<Json<QuestCompletedResponse>, ApiError> {
    let id = parse_story_id(&id)?;
    let evidence = QuestEvidence::from_parts(req.user_photo, req.user_answer).ok_or_else(|| {
        ApiError::Unprocessable("Submit either a photo or an answer, not both".to_string())
    })?;

    let outcome = app
        .use_cases
        .adventure
        .complete_quest
        .execute(id, req.expected_quest_index, evidence)
        .await?;
    Ok(Json(outcome.into()))
}

fn parse_story_id(raw: &str) -> Result<StoryId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid adventure ID".to_string()))
}

// =============================================================================
// Profile
// =============================================================================

async fn get_profile(State(app): State<Arc<App>>) -> Result<Json<UserProfile>, ApiError> {
    let profile = app.use_cases.profile.get.execute().await?;
    Ok(Json(profile))
}

async fn update_profile(
    State(app): State<Arc<App>>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = app.use_cases.profile.update.execute(req.into()).await?;
    Ok(Json(profile))
}

// =============================================================================
// Geocoding
// =============================================================================

#[derive(Debug, Deserialize)]
struct ReverseQuery {
    lat: f64,
    lng: f64,
}

async fn reverse_geocode(
    State(app): State<Arc<App>>,
    Query(query): Query<ReverseQuery>,
) -> Result<Json<PlaceResponse>, ApiError> {
    let place = app
        .use_cases
        .describe_position
        .execute(query.lat, query.lng)
        .await?
        .ok_or_else(|| ApiError::NotFound("No place found at this position".to_string()))?;
    Ok(Json(place.into()))
}

// =============================================================================
// Errors
// =============================================================================

/// Errors surfaced to HTTP clients.
///
/// Player-fixable problems carry their message; collaborator failures are
/// logged where they are converted and answered with a generic body.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unprocessable(String),
    Conflict(String),
    BadGateway,
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::BadGateway => (
                StatusCode::BAD_GATEWAY,
                "Something went wrong. Please try again.".to_string(),
            ),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong. Please try again.".to_string(),
            ),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<AdventureError> for ApiError {
    fn from(e: AdventureError) -> Self {
        match e {
            AdventureError::NotFound(id) => {
                ApiError::NotFound(format!("Adventure not found: {}", id))
            }
            AdventureError::Validation(msg) => ApiError::Unprocessable(msg),
            AdventureError::Domain(e) => ApiError::Unprocessable(e.to_string()),
            AdventureError::Completion(e) if e.is_recoverable() => {
                ApiError::Unprocessable(e.to_string())
            }
            AdventureError::Completion(e) => ApiError::Conflict(e.to_string()),
            AdventureError::Generation(e) => {
                tracing::error!(error = %e, "Adventure generation failed");
                ApiError::BadGateway
            }
            AdventureError::Repo(e) => {
                tracing::error!(error = %e, "Adventure storage failed");
                ApiError::Internal
            }
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(e: ProfileError) -> Self {
        match e {
            ProfileError::Validation(e) => ApiError::Unprocessable(e.to_string()),
            ProfileError::Repo(e) => {
                tracing::error!(error = %e, "Profile storage failed");
                ApiError::Internal
            }
        }
    }
}

impl From<LocationError> for ApiError {
    fn from(e: LocationError) -> Self {
        match e {
            LocationError::InvalidPosition(e) => ApiError::Unprocessable(e.to_string()),
            LocationError::Geocode(_) => ApiError::BadGateway,
        }
    }
}
