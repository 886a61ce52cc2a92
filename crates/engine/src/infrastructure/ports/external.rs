//! External service port traits (LLM, adventure generation, geocoding).

use async_trait::async_trait;
use echoes_domain::{AdventureTemplate, Coordinates};
use serde::{Deserialize, Serialize};

use super::error::{GenerationError, GeocodeError, LlmError};

// =============================================================================
// LLM Types
// =============================================================================

/// LLM request/response types
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// The conversation history
    pub messages: Vec<ChatMessage>,
    /// System prompt / context
    pub system_prompt: Option<String>,
    /// Temperature for response generation (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Ask the model for a bare JSON object
    pub json_output: bool,
}

impl LlmRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            system_prompt: None,
            temperature: None,
            json_output: false,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }
}

/// A message in the conversation
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    System,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::System => "system",
        }
    }
}

/// Response from the LLM
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// The generated text content
    pub content: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmPort: Send + Sync {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;
}

// =============================================================================
// Adventure Generation
// =============================================================================

/// Produces the content of a new adventure for a place.
///
/// Implementations must only return templates that pass
/// `AdventureTemplate::validate`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdventureGeneratorPort: Send + Sync {
    async fn generate(
        &self,
        location: &str,
        language: &str,
    ) -> Result<AdventureTemplate, GenerationError>;
}

// =============================================================================
// Geocoding
// =============================================================================

/// A human-readable description of a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDescription {
    /// Full display name as returned by the provider
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl PlaceDescription {
    /// Short "City, Country" label, falling back to the display name.
    pub fn label(&self) -> String {
        match (&self.city, &self.country) {
            (Some(city), Some(country)) => format!("{}, {}", city, country),
            (Some(city), None) => city.clone(),
            _ => self.display_name.clone(),
        }
    }
}

/// Reverse geocoding. Advisory only; never part of the progression model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    async fn reverse(&self, position: Coordinates) -> Result<Option<PlaceDescription>, GeocodeError>;
}
