//! Gemini API quiz generator implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use quizdeck_core::error::GeneratorError;
use quizdeck_core::model::{Card, OPTION_COUNT};
use quizdeck_core::traits::QuizGenerator;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Gemini `generateContent` client.
///
/// Issues a single structured-output request per quiz; retry and timeout
/// policy beyond the HTTP client's own is deliberately absent, the assembler
/// absorbs every failure into its fallback path.
pub struct GeminiGenerator {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiGenerator {
    pub fn new(api_key: &str, base_url: Option<String>, model: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            client,
        }
    }

    fn build_prompt(cards: &[Card]) -> String {
        let pairs: Vec<serde_json::Value> = cards
            .iter()
            .map(|c| serde_json::json!({ "word": c.term, "definition": c.definition }))
            .collect();
        format!(
            "Generate a multiple-choice quiz based on these flashcards. \
             For each word, provide 3 plausible but incorrect distractors in the \
             same language as the definition. \
             Flashcards: {} \
             Return the quiz as a JSON array.",
            serde_json::Value::Array(pairs)
        )
    }

    /// Structured-output schema: an array of question objects, all fields
    /// required, exactly four options including the correct answer.
    fn response_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "word": { "type": "STRING" },
                    "correctAnswer": { "type": "STRING" },
                    "options": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "minItems": OPTION_COUNT,
                        "maxItems": OPTION_COUNT,
                        "description": "Must include the correct answer and 3 distractors."
                    },
                    "explanation": {
                        "type": "STRING",
                        "description": "A short sentence using the word."
                    }
                },
                "required": ["word", "correctAnswer", "options", "explanation"]
            }
        })
    }
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Deserialize)]
struct GeminiErrorBody {
    message: String,
}

#[async_trait]
impl QuizGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip(self, cards), fields(model = %self.model, cards = cards.len()))]
    async fn generate(&self, cards: &[Card]) -> anyhow::Result<String> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: Self::build_prompt(cards),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Self::response_schema(),
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeneratorError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    GeneratorError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5)
                * 1000;
            return Err(GeneratorError::RateLimited {
                retry_after_ms: retry_after,
            }
            .into());
        }
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::AuthenticationFailed(body).into());
        }
        if status == 404 {
            return Err(GeneratorError::ModelNotFound(self.model.clone()).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GeneratorError::ApiError { status, message }.into());
        }

        let api_response: GeminiResponse =
            response.json().await.map_err(|e| GeneratorError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        let text = api_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .unwrap_or_default();

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cards() -> Vec<Card> {
        vec![Card::new("apple", "사과"), Card::new("banana", "바나나")]
    }

    fn endpoint() -> String {
        format!("/v1beta/models/{DEFAULT_MODEL}:generateContent")
    }

    #[tokio::test]
    async fn successful_generation_returns_payload_text() {
        let server = MockServer::start().await;

        let payload = serde_json::json!([{
            "word": "apple",
            "correctAnswer": "사과",
            "options": ["사과", "바나나", "포도", "수박"],
            "explanation": "I ate an apple."
        }]);
        let response_body = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": payload.to_string() }] }
            }]
        });

        Mock::given(method("POST"))
            .and(path(endpoint()))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_string_contains("apple"))
            .and(body_string_contains("responseSchema"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let generator = GeminiGenerator::new("test-key", Some(server.uri()), None);
        let text = generator.generate(&cards()).await.unwrap();
        assert!(text.contains("correctAnswer"));
        assert!(text.contains("사과"));
    }

    #[tokio::test]
    async fn empty_candidates_yield_empty_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(endpoint()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
            )
            .mount(&server)
            .await;

        let generator = GeminiGenerator::new("test-key", Some(server.uri()), None);
        let text = generator.generate(&cards()).await.unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn authentication_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(endpoint()))
            .respond_with(ResponseTemplate::new(403).set_body_string("key invalid"))
            .mount(&server)
            .await;

        let generator = GeminiGenerator::new("bad-key", Some(server.uri()), None);
        let err = generator.generate(&cards()).await.unwrap_err();
        assert!(err.to_string().contains("authentication"));
    }

    #[tokio::test]
    async fn rate_limiting() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(endpoint()))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "5"))
            .mount(&server)
            .await;

        let generator = GeminiGenerator::new("test-key", Some(server.uri()), None);
        let err = generator.generate(&cards()).await.unwrap_err();
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn api_error_carries_service_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(endpoint()))
            .respond_with(ResponseTemplate::new(500).set_body_json(
                serde_json::json!({ "error": { "message": "backend exploded" } }),
            ))
            .mount(&server)
            .await;

        let generator = GeminiGenerator::new("test-key", Some(server.uri()), None);
        let err = generator.generate(&cards()).await.unwrap_err();
        assert!(err.to_string().contains("backend exploded"));
    }

    #[test]
    fn prompt_embeds_card_pairs() {
        let prompt = GeminiGenerator::build_prompt(&cards());
        assert!(prompt.contains("\"word\":\"apple\""));
        assert!(prompt.contains("\"definition\":\"사과\""));
        assert!(prompt.contains("JSON array"));
    }
}
