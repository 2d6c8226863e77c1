//! Chat-completion client for the text-generation API (OpenRouter).

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::config::AiSettings;
use crate::errors::{AppError, AppResult};

/// One chat-completion call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: Option<f32>,
    /// Overrides the client-wide timeout
    pub timeout: Option<Duration>,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            temperature: 0.7,
            max_tokens: 1000,
            top_p: None,
            timeout: None,
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Produces the assistant message text for a prompt.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String>;

    /// Model identifier recorded with generated content
    fn model(&self) -> String;
}

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatContent>,
}

#[derive(Deserialize)]
struct ChatContent {
    content: Option<String>,
}

/// OpenRouter chat-completions client
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenRouterClient {
    /// Build a client; fails when no usable API key is configured.
    pub fn new(settings: &AiSettings) -> AppResult<Self> {
        let api_key = settings
            .api_key()
            .ok_or_else(|| AppError::internal("OpenRouter API key is not configured"))?
            .to_string();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            api_url: settings.api_url.clone(),
            api_key,
            model: settings.model.clone(),
        })
    }
}

#[async_trait]
impl TextGenerator for OpenRouterClient {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
        let body = ChatBody {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            top_p: request.top_p,
        };

        let mut call = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body);
        if let Some(timeout) = request.timeout {
            call = call.timeout(timeout);
        }

        let response = call.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::generation("text generation request timed out")
            } else {
                AppError::generation(format!("text generation request failed: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::generation(format!(
                "text generation API returned {}",
                status
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::generation(format!("malformed completion body: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| AppError::generation("completion has no message content"))
    }

    fn model(&self) -> String {
        self.model.clone()
    }
}

static FENCED_JSON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").expect("fence pattern compiles")
});

/// Cut the JSON document out of a model reply.
///
/// A fenced block wins; otherwise the span from the first `{` to the last `}`.
pub fn extract_json(text: &str) -> Option<&str> {
    if let Some(body) = FENCED_JSON.captures(text).and_then(|c| c.get(1)) {
        return Some(body.as_str());
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Extract and decode a typed document from a model reply.
pub fn parse_reply<T: DeserializeOwned>(text: &str) -> AppResult<T> {
    let json = extract_json(text)
        .ok_or_else(|| AppError::generation("reply contains no JSON object"))?;
    serde_json::from_str(json)
        .map_err(|e| AppError::generation(format!("reply is not valid JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_extract_from_json_fence() {
        let reply = "Here you go:\n```json\n{\"overview\": \"Rome\"}\n```\nEnjoy!";
        assert_eq!(extract_json(reply), Some("{\"overview\": \"Rome\"}"));
    }

    #[test]
    fn test_extract_from_bare_fence() {
        let reply = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json(reply), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_extract_from_surrounding_prose() {
        let reply = "Sure! {\"a\": {\"b\": 2}} Let me know.";
        assert_eq!(extract_json(reply), Some("{\"a\": {\"b\": 2}}"));
    }

    #[test]
    fn test_extract_without_object() {
        assert_eq!(extract_json("no json here"), None);
        assert_eq!(extract_json("} backwards {"), None);
    }

    #[test]
    fn test_parse_reply_failure_is_generation_error() {
        let err = parse_reply::<Value>("{not json}").unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
    }

    #[test]
    fn test_client_requires_key() {
        assert!(OpenRouterClient::new(&AiSettings::offline()).is_err());
        assert!(
            OpenRouterClient::new(&AiSettings::offline().with_api_key("sk-or-v1-abcdefghijklmnop"))
                .is_ok()
        );
    }

    #[test]
    fn test_request_builder() {
        let request = CompletionRequest::new("system", "prompt")
            .temperature(0.3)
            .max_tokens(1500)
            .top_p(0.9)
            .timeout(Duration::from_secs(15));
        assert_eq!(request.temperature, 0.3);
        assert_eq!(request.max_tokens, 1500);
        assert_eq!(request.top_p, Some(0.9));
        assert_eq!(request.timeout, Some(Duration::from_secs(15)));
    }
}
