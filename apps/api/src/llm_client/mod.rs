//! LLM Client: the single point of entry for all chat-completion calls in JobGenie.
//!
//! ARCHITECTURAL RULE: No other module may call the generation API directly.
//! Pipeline code depends on the `TextGenerator` trait; `LlmClient` is the production
//! implementation, built once at startup and shared through `AppState`.
//!
//! No retries and no backoff: a failed call is returned to the caller as-is.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[cfg(test)]
pub mod fake;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Model and temperature for one kind of call. Each pipeline operation owns a fixed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub model: &'static str,
    pub temperature: f32,
}

/// Anything that can turn a single user prompt into completion text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str, sampling: Sampling) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if the model returned any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The single chat-completions client used by the pipeline.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Checks the credential against `GET {base_url}/models`.
    /// Called once at startup; a rejected key stops the process.
    pub async fn verify_api_key(&self) -> Result<(), LlmError> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(LlmError::Api {
            status: status.as_u16(),
            message: api_error_message(body),
        })
    }

    /// Makes a raw call to the chat-completions endpoint with one user message.
    pub async fn call(&self, prompt: &str, sampling: Sampling) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: sampling.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: sampling.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let chat_response: ChatResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                model = sampling.model,
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn complete(&self, prompt: &str, sampling: Sampling) -> Result<String, LlmError> {
        let response = self.call(prompt, sampling).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Pulls `error.message` out of an API error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    const SAMPLING: Sampling = Sampling {
        model: "gpt-4",
        temperature: 0.4,
    };

    fn client_for(server: &MockServer) -> LlmClient {
        LlmClient::new("sk-test".to_string(), server.url("/v1")).unwrap()
    }

    #[test]
    fn test_api_error_message_extracts_nested_message() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(
            api_error_message(body.to_string()),
            "Incorrect API key provided"
        );
    }

    #[test]
    fn test_api_error_message_falls_back_to_raw_body() {
        assert_eq!(api_error_message("upstream down".to_string()), "upstream down");
    }

    #[tokio::test]
    async fn test_complete_sends_single_user_message_with_bearer_auth() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/chat/completions")
                    .header("authorization", "Bearer sk-test")
                    .json_body(json!({
                        "model": "gpt-4",
                        "messages": [{"role": "user", "content": "Write a cover letter"}],
                        "temperature": 0.4
                    }));
                then.status(200).json_body(json!({
                    "choices": [{"message": {"role": "assistant", "content": "Dear Hiring Manager,"}}],
                    "usage": {"prompt_tokens": 12, "completion_tokens": 5}
                }));
            })
            .await;

        let text = client_for(&server)
            .complete("Write a cover letter", SAMPLING)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text, "Dear Hiring Manager,");
    }

    #[tokio::test]
    async fn test_response_text_is_returned_verbatim() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).json_body(json!({
                    "choices": [{"message": {"content": "  A\n\nB\n\n"}}]
                }));
            })
            .await;

        let text = client_for(&server).complete("p", SAMPLING).await.unwrap();
        assert_eq!(text, "  A\n\nB\n\n");
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_api_error_without_retry() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(401)
                    .json_body(json!({"error": {"message": "Incorrect API key provided"}}));
            })
            .await;

        let err = client_for(&server).complete("p", SAMPLING).await.unwrap_err();

        assert_eq!(mock.hits_async().await, 1, "failures must not be retried");
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_is_not_retried() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(429).body("Rate limit reached");
            })
            .await;

        let err = client_for(&server).complete("p", SAMPLING).await.unwrap_err();

        assert_eq!(mock.hits_async().await, 1);
        assert!(matches!(err, LlmError::Api { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_missing_content_is_empty_content_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).json_body(json!({"choices": []}));
            })
            .await;

        let err = client_for(&server).complete("p", SAMPLING).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).body("<html>gateway</html>");
            })
            .await;

        let err = client_for(&server).complete("p", SAMPLING).await.unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[tokio::test]
    async fn test_verify_api_key_accepts_valid_key() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/models")
                    .header("authorization", "Bearer sk-test");
                then.status(200).json_body(json!({"data": []}));
            })
            .await;

        client_for(&server).verify_api_key().await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_verify_api_key_rejects_invalid_key() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/models");
                then.status(401)
                    .json_body(json!({"error": {"message": "Invalid authentication"}}));
            })
            .await;

        let err = client_for(&server).verify_api_key().await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 401, .. }));
    }
}
