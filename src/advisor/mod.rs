//! Crop advisor — a Groq-hosted chat model behind an OpenAI-compatible API.
//!
//! The advisor is optional: it needs `GROQ_API_KEY` in the environment
//! and is only contacted on demand. Replies arrive as free text; the
//! `parse` module distills them into short crop names.

pub mod parse;
pub mod prompt;

use std::time::Duration;

use serde_json::json;
use thiserror::Error;
use tracing::info;

use crate::shared::{GeoPoint, WeatherSnapshot};

/// Per-request timeout. Reasoning models can take a while.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// OpenAI-compatible Groq endpoint.
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1";

/// Default chat model for recommendations.
pub const DEFAULT_MODEL: &str = "qwen/qwen3-32b";

const TEMPERATURE: f64 = 0.6;
const MAX_COMPLETION_TOKENS: u32 = 256;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("GROQ_API_KEY is not set")]
    MissingApiKey,
    #[error("advisor request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("advisor returned HTTP {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("advisor response had no message content")]
    MalformedResponse,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

impl AdvisorConfig {
    /// Read the advisor configuration from the environment. Only the API
    /// key is mandatory; URL and model fall back to the Groq defaults.
    pub fn from_env() -> Result<Self, AdvisorError> {
        let api_key = std::env::var("GROQ_API_KEY").map_err(|_| AdvisorError::MissingApiKey)?;
        let api_url =
            std::env::var("GROQ_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        let model = std::env::var("ADVISOR_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_owned());
        Ok(Self {
            api_url,
            api_key,
            model,
        })
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AdvisorClient {
    client: reqwest::Client,
    config: AdvisorConfig,
}

impl AdvisorClient {
    pub fn new(config: AdvisorConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Ask the model for crops suited to the location and its weather.
    pub async fn recommend_crops(
        &self,
        location: GeoPoint,
        weather: &WeatherSnapshot,
    ) -> Result<Vec<String>, AdvisorError> {
        let url = format!("{}/chat/completions", self.config.api_url);
        let body = json!({
            "model": self.config.model,
            "temperature": TEMPERATURE,
            "max_completion_tokens": MAX_COMPLETION_TOKENS,
            "messages": [
                { "role": "system", "content": prompt::SYSTEM_PROMPT },
                { "role": "user", "content": prompt::build_prompt(location, weather) },
            ],
        });

        info!("[Advisor] Requesting recommendations from {}", self.config.model);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_owned());
            return Err(AdvisorError::Api { status, body });
        }

        let payload: serde_json::Value = response.json().await?;
        let content = extract_chat_content(&payload).ok_or(AdvisorError::MalformedResponse)?;
        Ok(parse::crop_lines(content))
    }
}

/// Pull `choices[0].message.content` out of a chat-completion payload.
fn extract_chat_content(payload: &serde_json::Value) -> Option<&str> {
    payload
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
}
