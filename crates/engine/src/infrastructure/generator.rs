//! LLM-backed adventure generator.
//!
//! Asks the model for a single JSON object shaped like [`AdventureTemplate`],
//! then decodes and validates it. Models often wrap JSON in a markdown fence
//! or add a sentence around it, so the object is cut out before decoding.

use async_trait::async_trait;
use echoes_domain::AdventureTemplate;
use std::sync::Arc;

use crate::infrastructure::ports::{
    AdventureGeneratorPort, ChatMessage, GenerationError, LlmPort, LlmRequest,
};

const SYSTEM_PROMPT: &str = r#"You design short, real-world exploration adventures.
Reply with ONE JSON object and nothing else, using exactly these fields:
{
  "title": string,
  "introNarrative": string,
  "destination": { "name": "Place, City, Country", "latitude": number, "longitude": number },
  "quests": [
    {
      "title": string,
      "description": string,
      "narrative": string,
      "type": "navigation" | "puzzle" | "photo" | "audio_story" | "exploration",
      "targetLocationName": string,
      "latitude": number,
      "longitude": number,
      "puzzle": { "prompt": string, "solution": string, "hint": string },
      "points": number
    }
  ]
}
Include "puzzle" only for quests of type "puzzle". Use 3 to 5 quests at real
places near the destination. End the destination name with the country."#;

const GENERATION_TEMPERATURE: f32 = 0.8;

pub struct LlmAdventureGenerator {
    llm: Arc<dyn LlmPort>,
}

impl LlmAdventureGenerator {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl AdventureGeneratorPort for LlmAdventureGenerator {
    async fn generate(
        &self,
        location: &str,
        language: &str,
    ) -> Result<AdventureTemplate, GenerationError> {
        let request = LlmRequest::new(vec![ChatMessage::user(user_prompt(location, language))])
            .with_system_prompt(SYSTEM_PROMPT)
            .with_temperature(GENERATION_TEMPERATURE)
            .with_json_output();

        let response = self.llm.generate(request).await?;
        let template = parse_template(&response.content)?;

        tracing::info!(
            location = %location,
            title = %template.title,
            quests = template.quests.len(),
            "Generated adventure"
        );
        Ok(template)
    }
}

fn user_prompt(location: &str, language: &str) -> String {
    format!(
        "Create an adventure at: {}\nWrite every text field in the language with code '{}'.",
        location.trim(),
        language
    )
}

/// Decode and validate a template from raw model output.
fn parse_template(raw: &str) -> Result<AdventureTemplate, GenerationError> {
    let json = extract_json_object(raw)
        .ok_or_else(|| GenerationError::Malformed("no JSON object in response".to_string()))?;

    let template: AdventureTemplate =
        serde_json::from_str(json).map_err(|e| GenerationError::Malformed(e.to_string()))?;
    template.validate()?;
    Ok(template)
}

/// The outermost `{ ... }` span of `raw`, ignoring any fence or prose around it.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{LlmError, LlmResponse, MockLlmPort};
    use echoes_domain::QuestType;

    const TEMPLATE_JSON: &str = r#"{
        "title": "Whispers of Alfama",
        "introNarrative": "Fado drifts up the hill.",
        "destination": { "name": "Alfama, Lisbon, Portugal", "latitude": 38.7118, "longitude": -9.1300 },
        "quests": [
            {
                "title": "The Cathedral Door",
                "description": "Find the Sé",
                "narrative": "Old stones remember.",
                "type": "puzzle",
                "targetLocationName": "Lisbon Cathedral",
                "latitude": 38.7099,
                "longitude": -9.1334,
                "puzzle": { "prompt": "What city is this?", "solution": "Lisbon", "hint": "Capital" },
                "points": 150
            },
            {
                "title": "Viewpoint",
                "description": "Photograph the river",
                "narrative": "The Tagus shines.",
                "type": "photo",
                "targetLocationName": "Miradouro de Santa Luzia",
                "latitude": 38.7116,
                "longitude": -9.1301
            }
        ]
    }"#;

    mod parsing {
        use super::*;

        #[test]
        fn parses_bare_json() {
            let template = parse_template(TEMPLATE_JSON).unwrap();
            assert_eq!(template.title, "Whispers of Alfama");
            assert_eq!(template.quests.len(), 2);
            assert_eq!(template.quests[0].quest_type, QuestType::Puzzle);
            assert_eq!(template.quests[1].points, None);
        }

        #[test]
        fn strips_markdown_fence() {
            let raw = format!("Here you go:\n```json\n{}\n```\n", TEMPLATE_JSON);
            let template = parse_template(&raw).unwrap();
            assert_eq!(template.destination.country(), "Portugal");
        }

        #[test]
        fn tolerates_float_and_negative_points() {
            let raw = TEMPLATE_JSON
                .replace(r#""points": 150"#, r#""points": 150.0"#)
                .replace(r#""longitude": -9.1301"#, r#""longitude": -9.1301, "points": -20"#);
            let template = parse_template(&raw).unwrap();
            assert_eq!(template.quests[0].reward_points(), 150);
            assert_eq!(template.quests[1].points, None);
            assert_eq!(template.quests[1].reward_points(), 100);
        }

        #[test]
        fn rejects_text_without_object() {
            let err = parse_template("Sorry, I can't help with that.").unwrap_err();
            assert!(matches!(err, GenerationError::Malformed(_)));
        }

        #[test]
        fn rejects_wrong_shape() {
            let err = parse_template(r#"{"title": "No quests here"}"#).unwrap_err();
            assert!(matches!(err, GenerationError::Malformed(_)));
        }

        #[test]
        fn rejects_empty_quest_list() {
            let raw = r#"{
                "title": "Empty",
                "introNarrative": "",
                "destination": { "name": "Nowhere", "latitude": 0.0, "longitude": 0.0 },
                "quests": []
            }"#;
            let err = parse_template(raw).unwrap_err();
            assert!(matches!(err, GenerationError::InvalidTemplate(_)));
        }

        #[test]
        fn rejects_puzzle_without_puzzle_body() {
            let raw = r#"{
                "title": "Broken",
                "introNarrative": "",
                "destination": { "name": "Somewhere, Spain", "latitude": 40.0, "longitude": -3.0 },
                "quests": [{
                    "title": "Riddle", "description": "", "narrative": "",
                    "type": "puzzle", "targetLocationName": "Plaza",
                    "latitude": 40.0, "longitude": -3.0
                }]
            }"#;
            let err = parse_template(raw).unwrap_err();
            assert!(matches!(err, GenerationError::InvalidTemplate(_)));
        }
    }

    mod generate {
        use super::*;

        #[tokio::test]
        async fn sends_location_and_language_as_json_request() {
            let mut llm = MockLlmPort::new();
            llm.expect_generate()
                .withf(|req| {
                    req.json_output
                        && req.system_prompt.is_some()
                        && req.messages[0].content.contains("Alfama")
                        && req.messages[0].content.contains("'pt'")
                })
                .times(1)
                .returning(|_| {
                    Ok(LlmResponse {
                        content: TEMPLATE_JSON.to_string(),
                    })
                });

            let generator = LlmAdventureGenerator::new(Arc::new(llm));
            let template = generator.generate("  Alfama ", "pt").await.unwrap();
            assert_eq!(template.quests.len(), 2);
        }

        #[tokio::test]
        async fn llm_failure_is_unavailable() {
            let mut llm = MockLlmPort::new();
            llm.expect_generate()
                .returning(|_| Err(LlmError::RequestFailed("connection refused".into())));

            let generator = LlmAdventureGenerator::new(Arc::new(llm));
            let err = generator.generate("Rome", "en").await.unwrap_err();
            assert!(matches!(err, GenerationError::Unavailable(_)));
        }
    }
}
