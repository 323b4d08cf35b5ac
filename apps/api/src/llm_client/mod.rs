//! LLM Client: the single point of entry for chat-completion calls.
//!
//! No other module talks to the completion endpoint directly; handlers receive a
//! `CompletionBackend` through `AppState`.
//!
//! Model: gpt-4o-mini (hardcoded)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// The model used for every completion.
pub const MODEL: &str = "gpt-4o-mini";
/// Sampling temperature. `None` leaves it to the provider default.
pub const TEMPERATURE: Option<f32> = Some(0.7);
const REQUEST_TIMEOUT_SECS: u64 = 600;

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

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
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
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Content of the first choice, untouched.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Anything that can turn a prompt into completion text.
///
/// Carried in `AppState` as `Arc<dyn CompletionBackend>` so tests can swap in a mock.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Wraps the chat-completions API. One request per call, no retries.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: &str) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    /// Sends the prompt as the sole user message and returns the full response object.
    pub async fn call(&self, prompt: &str) -> Result<ChatResponse, LlmError> {
        let request_body = build_request(prompt);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("failed to read error body: {e}"));
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let body = response.text().await?;
        let chat_response: ChatResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl CompletionBackend for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

fn build_request(prompt: &str) -> ChatRequest<'_> {
    ChatRequest {
        model: MODEL,
        messages: vec![ChatMessage {
            role: "user",
            content: prompt,
        }],
        temperature: TEMPERATURE,
    }
}

/// Uses the provider's `error.message` when the body has one, else the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ApiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    /// What the local completion endpoint saw for one request.
    struct Captured {
        authorization: Option<String>,
        body: Value,
    }

    #[derive(Clone)]
    struct StubEndpoint {
        status: StatusCode,
        reply: String,
        seen: Arc<Mutex<Vec<Captured>>>,
    }

    async fn stub_completions(
        State(stub): State<StubEndpoint>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        stub.seen.lock().unwrap().push(Captured {
            authorization,
            body,
        });
        (
            stub.status,
            [(header::CONTENT_TYPE, "application/json")],
            stub.reply.clone(),
        )
    }

    /// Serves `/v1/chat/completions` on an ephemeral port; returns the base URL.
    async fn spawn_endpoint(status: StatusCode, reply: &str) -> (String, Arc<Mutex<Vec<Captured>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/v1/chat/completions", post(stub_completions))
            .with_state(StubEndpoint {
                status,
                reply: reply.to_string(),
                seen: seen.clone(),
            });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/v1"), seen)
    }

    #[tokio::test]
    async fn test_complete_posts_prompt_with_bearer_key() {
        let reply = json!({
            "choices": [{"message": {"role": "assistant", "content": "### Option 1 (Prägnant & Direkt)\nA"}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4}
        });
        let (base_url, seen) = spawn_endpoint(StatusCode::OK, &reply.to_string()).await;
        let client = LlmClient::new("sk-test".to_string(), &base_url).unwrap();

        let text = client.complete("Ware nie erhalten").await.unwrap();
        assert_eq!(text, "### Option 1 (Prägnant & Direkt)\nA");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1, "exactly one request");
        assert_eq!(seen[0].authorization.as_deref(), Some("Bearer sk-test"));
        assert_eq!(seen[0].body["model"], "gpt-4o-mini");
        assert_eq!(seen[0].body["messages"][0]["role"], "user");
        assert_eq!(seen[0].body["messages"][0]["content"], "Ware nie erhalten");
    }

    #[tokio::test]
    async fn test_complete_maps_provider_error_message() {
        let reply = json!({"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}});
        let (base_url, seen) = spawn_endpoint(StatusCode::UNAUTHORIZED, &reply.to_string()).await;
        let client = LlmClient::new("sk-wrong".to_string(), &base_url).unwrap();

        match client.complete("x").await {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(seen.lock().unwrap().len(), 1, "no retry");
    }

    #[tokio::test]
    async fn test_complete_keeps_raw_error_body() {
        let (base_url, seen) = spawn_endpoint(StatusCode::SERVICE_UNAVAILABLE, "upstream overloaded").await;
        let client = LlmClient::new("sk-test".to_string(), &base_url).unwrap();

        let err = client.complete("x").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "API error (status 503): upstream overloaded"
        );
        assert_eq!(seen.lock().unwrap().len(), 1, "no retry on 5xx");
    }

    #[tokio::test]
    async fn test_complete_null_content_is_empty_content() {
        let reply = json!({"choices": [{"message": {"role": "assistant", "content": null}}]});
        let (base_url, _seen) = spawn_endpoint(StatusCode::OK, &reply.to_string()).await;
        let client = LlmClient::new("sk-test".to_string(), &base_url).unwrap();

        assert!(matches!(
            client.complete("x").await,
            Err(LlmError::EmptyContent)
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(build_request("Hallo")).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Hallo");
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_temperature_omitted_when_unset() {
        let mut request = build_request("Hallo");
        request.temperature = None;
        let body = serde_json::to_value(request).unwrap();
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_text_takes_first_choice() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "### Option 1 (Prägnant & Direkt)\nA"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }))
        .unwrap();
        assert_eq!(
            response.text(),
            Some("### Option 1 (Prägnant & Direkt)\nA")
        );
    }

    #[test]
    fn test_text_none_when_content_null_or_no_choices() {
        let null_content: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();
        assert!(null_content.text().is_none());

        let no_choices: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(no_choices.text().is_none());
    }

    #[test]
    fn test_api_error_message_prefers_provider_message() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(
            api_error_message(body.to_string()),
            "Incorrect API key provided"
        );
    }

    #[test]
    fn test_api_error_message_falls_back_to_raw_body() {
        assert_eq!(
            api_error_message("Bad Gateway".to_string()),
            "Bad Gateway"
        );
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = LlmClient::new("sk-test".to_string(), "http://localhost:9000/v1/").unwrap();
        assert_eq!(client.endpoint, "http://localhost:9000/v1/chat/completions");
    }
}
