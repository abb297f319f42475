// src/llm.rs
// Chat-completion client for an OpenAI-compatible endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};

const USER_AGENT: &str = "meridian-briefs/0.1";

/// One role-tagged message; conversation order is meaningful and preserved
/// exactly as given on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Token counts reported by the remote service. Informational only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    n: u8,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Usage,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Client for `POST /chat/completions`. Stateless; one call is one round
/// trip, exactly one completion candidate is requested, and any resilience
/// policy (retry, backoff) is the caller's responsibility.
pub struct LlmClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("reqwest client");
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.llm_base_url, &config.llm_api_key)
    }

    /// Send one chat-completion request and return the first candidate's
    /// text plus token usage.
    ///
    /// `model` is not validated locally; an unknown model comes back as a
    /// `RemoteService` error with the remote payload intact, as do auth and
    /// quota rejections.
    pub async fn call_llm(
        &self,
        model: &str,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<(String, Usage)> {
        let request = ChatRequest {
            model,
            messages,
            n: 1,
            temperature,
        };

        let response = self
            .http
            .post(format!(
                "{}/chat/completions",
                self.base_url.trim_end_matches('/')
            ))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::RemoteService {
                status,
                detail: body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| Error::response_format("/chat/completions", e.to_string()))?;
        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            Error::response_format("/chat/completions", "no choices in response")
        })?;

        Ok((choice.message.content, parsed.usage))
    }

    /// `call_llm` with the default temperature of 0 (deterministic-leaning).
    pub async fn call_llm_default(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<(String, Usage)> {
        self.call_llm(model, messages, 0.0).await
    }
}
