//! Ollama LLM client (OpenAI-compatible API)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::infrastructure::ports::{ChatMessage, LlmError, LlmPort, LlmRequest, LlmResponse};

/// Client for Ollama's OpenAI-compatible API
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

/// Default Ollama base URL.
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Default model for Ollama.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

impl OllamaClient {
    pub fn new(base_url: &str, model: &str) -> Self {
        // Use 120 second timeout for LLM requests (they can be slow)
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new(DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL)
    }
}

#[async_trait]
impl LlmPort for OllamaClient {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let api_request = build_request(&self.model, &request);

        tracing::debug!(model = %self.model, json = request.json_output, "Sending chat completion");

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&api_request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .map_err(|e| LlmError::RequestFailed(e.to_string()))?;
            return Err(LlmError::RequestFailed(format!("{}: {}", status, error_text)));
        }

        let api_response: OpenAIChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        convert_response(api_response)
    }
}

fn build_request(model: &str, request: &LlmRequest) -> OpenAIChatRequest {
    OpenAIChatRequest {
        model: model.to_string(),
        messages: build_messages(request),
        temperature: request.temperature,
        response_format: request.json_output.then(|| OpenAIResponseFormat {
            r#type: "json_object".to_string(),
        }),
    }
}

fn build_messages(request: &LlmRequest) -> Vec<OpenAIMessage> {
    let system = request.system_prompt.as_deref().map(ChatMessage::system);

    system
        .iter()
        .chain(&request.messages)
        .map(|msg| OpenAIMessage {
            role: msg.role.as_str().to_string(),
            content: Some(msg.content.clone()),
        })
        .collect()
}

fn convert_response(response: OpenAIChatResponse) -> Result<LlmResponse, LlmError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("No choices in LLM response".to_string()))?;

    match choice.message.content {
        Some(content) if !content.trim().is_empty() => Ok(LlmResponse { content }),
        _ => Err(LlmError::InvalidResponse(
            "Empty content in LLM response".to_string(),
        )),
    }
}

// =============================================================================
// OpenAI API types
// =============================================================================

#[derive(Debug, Serialize)]
struct OpenAIChatRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<OpenAIResponseFormat>,
}

#[derive(Debug, Serialize)]
struct OpenAIResponseFormat {
    r#type: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize, Default)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::ChatMessage;

    #[test]
    fn system_prompt_goes_first() {
        let request = LlmRequest::new(vec![ChatMessage::user("Lisbon")])
            .with_system_prompt("You write adventures.");
        let messages = build_messages(&request);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content.as_deref(), Some("Lisbon"));
    }

    #[test]
    fn json_output_sets_response_format() {
        let request = LlmRequest::new(vec![ChatMessage::user("x")])
            .with_temperature(0.7)
            .with_json_output();
        let body = serde_json::to_value(build_request("llama3.2", &request)).unwrap();

        assert_eq!(body["model"], "llama3.2");
        assert_eq!(body["response_format"]["type"], "json_object");
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn plain_request_omits_optional_fields() {
        let request = LlmRequest::new(vec![ChatMessage::user("x")]);
        let body = serde_json::to_value(build_request("m", &request)).unwrap();

        assert!(body.get("response_format").is_none());
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn convert_takes_first_choice() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"{\"title\":\"x\"}"}}]}"#;
        let response: OpenAIChatResponse = serde_json::from_str(raw).unwrap();
        let converted = convert_response(response).unwrap();
        assert_eq!(converted.content, "{\"title\":\"x\"}");
    }

    #[test]
    fn convert_rejects_empty_choices() {
        let response = OpenAIChatResponse { choices: vec![] };
        assert!(matches!(
            convert_response(response),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[test]
    fn convert_rejects_blank_content() {
        let response = OpenAIChatResponse {
            choices: vec![OpenAIChoice {
                message: OpenAIMessage {
                    role: "assistant".into(),
                    content: Some("  ".into()),
                },
            }],
        };
        assert!(convert_response(response).is_err());
    }
}
