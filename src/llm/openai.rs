//! OpenAI chat completions client
//!
//! Implements the LlmClient trait against any OpenAI-compatible
//! `/chat/completions` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{Value, json};

use super::client::{LlmClient, LlmError};
use super::types::{CompletionRequest, CompletionResponse, Role, Usage};

/// Default API base URL
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Default environment variable holding the credential
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Configuration for the OpenAI client
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Create a config with an explicit API key and default endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: OPENAI_API_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Read the API key from the named environment variable
    pub fn from_env(env_var: &str) -> Result<Self, LlmError> {
        match std::env::var(env_var) {
            Ok(key) if !key.is_empty() => Ok(Self::new(key)),
            _ => Err(LlmError::MissingApiKey {
                env_var: env_var.to_string(),
            }),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// OpenAI API client
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Build the request body for the chat completions API
    fn build_request(&self, request: &CompletionRequest) -> Value {
        let messages: Vec<Value> = request
            .messages
            .iter()
            .map(|m| {
                json!({
                    "role": match m.role {
                        Role::User => "user",
                    },
                    "content": m.content
                })
            })
            .collect();

        json!({
            "model": request.model,
            "messages": messages,
            "temperature": request.temperature
        })
    }

    /// Parse the API response into a CompletionResponse
    fn parse_response(&self, body: Value) -> Result<CompletionResponse, LlmError> {
        let message = body
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .ok_or_else(|| LlmError::InvalidResponse("response has no choices".to_string()))?;

        // A null content (e.g. a refusal) is recorded as empty output
        let content = message["content"].as_str().unwrap_or_default().to_string();

        let usage = body
            .get("usage")
            .cloned()
            .ok_or_else(|| LlmError::InvalidResponse("response has no usage".to_string()))?;
        let usage: Usage = serde_json::from_value(usage)
            .map_err(|e| LlmError::InvalidResponse(format!("bad usage block: {}", e)))?;

        Ok(CompletionResponse { content, usage })
    }

    /// Send a request to the API
    async fn send_request(&self, body: Value) -> Result<Value, LlmError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::from_status(status.as_u16(), error_message(&text)));
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

/// Pull `error.message` out of an API error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| {
            if body.is_empty() {
                "Unknown error".to_string()
            } else {
                body.to_string()
            }
        })
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!("Sending completion request to {} (model {})", self.endpoint(), request.model);
        let body = self.build_request(&request);
        let response = self.send_request(body).await?;
        self.parse_response(response)
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn test_client(base_url: &str) -> OpenAiClient {
        OpenAiClient::new(OpenAiConfig::new("test-key").with_base_url(base_url)).unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = OpenAiConfig::new("k");
        assert_eq!(config.base_url, OPENAI_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_config_debug_hides_key() {
        let config = OpenAiConfig::new("sk-secret");
        assert!(!format!("{:?}", config).contains("sk-secret"));
    }

    #[test]
    fn test_from_env_missing() {
        let result = OpenAiConfig::from_env("PROMPTPG_TEST_KEY_THAT_IS_NEVER_SET");
        assert!(matches!(result, Err(LlmError::MissingApiKey { .. })));
    }

    #[test]
    fn test_endpoint_trims_slash() {
        let client = test_client("http://localhost:1234/v1/");
        assert_eq!(client.endpoint(), "http://localhost:1234/v1/chat/completions");
    }

    #[test]
    fn test_build_request() {
        let client = test_client(OPENAI_API_URL);
        let body = client.build_request(&CompletionRequest::single("gpt-3.5-turbo", "Hello", 0.2));

        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["temperature"], 0.2);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Hello");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_parse_response() {
        let client = test_client(OPENAI_API_URL);
        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": "Bonjour" } }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13 }
        });

        let response = client.parse_response(body).unwrap();
        assert_eq!(response.content, "Bonjour");
        assert_eq!(response.usage.completion_tokens, 3);
        assert_eq!(response.usage.total_tokens, 13);
    }

    #[test]
    fn test_parse_response_no_choices() {
        let client = test_client(OPENAI_API_URL);
        let result = client.parse_response(json!({ "choices": [] }));
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_response_no_usage() {
        let client = test_client(OPENAI_API_URL);
        let result = client.parse_response(json!({
            "choices": [{ "message": { "content": "hi" } }]
        }));
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"error":{"message":"Invalid model"}}"#), "Invalid model");
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
        assert_eq!(error_message(""), "Unknown error");
    }

    #[tokio::test]
    async fn test_complete_against_mock_server() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .header("authorization", "Bearer test-key");
                then.status(200).json_body(json!({
                    "choices": [{ "message": { "role": "assistant", "content": "hello back" } }],
                    "usage": { "prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7 }
                }));
            })
            .await;

        let client = test_client(&server.base_url());
        let response = client
            .complete(CompletionRequest::single("gpt-3.5-turbo", "hello", 0.7))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.content, "hello back");
        assert_eq!(response.usage, Usage::new(5, 2));
    }

    #[tokio::test]
    async fn test_complete_unauthorized() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(401)
                    .json_body(json!({ "error": { "message": "Incorrect API key provided" } }));
            })
            .await;

        let client = test_client(&server.base_url());
        let err = client
            .complete(CompletionRequest::single("gpt-3.5-turbo", "hello", 0.7))
            .await
            .unwrap_err();

        match err {
            LlmError::Auth { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("Expected auth error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_rate_limited() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(429).body("too many requests");
            })
            .await;

        let client = test_client(&server.base_url());
        let err = client
            .complete(CompletionRequest::single("gpt-3.5-turbo", "hello", 0.7))
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::RateLimited { .. }));
    }
}
