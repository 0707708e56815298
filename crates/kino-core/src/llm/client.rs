//! Gemini API HTTP Client

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, warn};

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::types::*;

/// Reply text used when generation fails
pub const PLACEHOLDER_REPLY: &str = "😶";

/// Anything that turns a prompt into generated text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a prompt. One attempt, no retry.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Generate text, substituting [`PLACEHOLDER_REPLY`] on any failure
pub async fn generate_or_placeholder(generator: &dyn TextGenerator, prompt: &str) -> String {
    match generator.generate(prompt).await {
        Ok(text) => text,
        Err(e) => {
            error!("Gemini API error: {}", e);
            PLACEHOLDER_REPLY.to_string()
        }
    }
}

/// Gemini `generateContent` client
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create with custom base URL (for testing or custom endpoints)
    pub fn with_base_url(config: &LlmConfig, base_url: impl Into<String>) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(client)
    }

    /// Send a `generateContent` request and return the parsed response
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        debug!("Sending request to Gemini API: {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            warn!("Gemini API error: {} - {}", status, body);
            return Err(Error::GeminiApi(format!("{}: {}", status, body)));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            Error::GeminiApi(format!("Failed to parse response: {} - {}", e, body))
        })?;

        info!(
            "Gemini API response: candidates={}, tokens={}",
            parsed.candidates.len(),
            parsed
                .usage_metadata
                .as_ref()
                .map(|u| u.candidates_token_count)
                .unwrap_or(0)
        );

        Ok(parsed)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest::from_prompt(prompt);
        let response = self.generate_content(&request).await?;
        response
            .first_text()
            .map(str::to_string)
            .ok_or(Error::EmptyResponse)
    }
}
