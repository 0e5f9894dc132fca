//! Google Gemini provider implementation.

use crate::{
    error::ProviderError, GenerateOptions, ProviderResult, TextProvider, DEFAULT_MAX_TOKENS,
    SYSTEM_PROMPT,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// The Gemini API base URL.
const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used when the configured model is empty or not a Gemini model.
const DEFAULT_MODEL: &str = "gemini-1.5-pro";

/// Google Gemini provider.
pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with API key.
    pub fn new(api_key: &str, model: &str) -> ProviderResult<Self> {
        Self::with_base_url(api_key, GEMINI_API_URL, model)
    }

    /// Create a new Gemini provider with a custom base URL.
    pub fn with_base_url(api_key: &str, base_url: &str, model: &str) -> ProviderResult<Self> {
        if api_key.is_empty() {
            return Err(ProviderError::missing_api_key("gemini"));
        }

        let model = if model.to_lowercase().contains("gemini") {
            model
        } else {
            if !model.is_empty() {
                warn!(model, "model is not a Gemini model, using {DEFAULT_MODEL}");
            }
            DEFAULT_MODEL
        };
        debug!(model, "creating Gemini provider");

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> ProviderResult<String> {
        // Gemini has no dedicated system role on this endpoint; the system
        // prompt is prepended to the user content.
        let text = format!(
            "{}\n\n{prompt}",
            options.system.as_deref().unwrap_or(SYSTEM_PROMPT)
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": text }] }],
            "generationConfig": {
                "temperature": options.temperature.unwrap_or(0.7),
                "maxOutputTokens": options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            },
        });

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        match status.as_u16() {
            401 | 403 => return Err(ProviderError::invalid_api_key("gemini")),
            429 => return Err(ProviderError::RateLimited),
            _ if !status.is_success() => {
                let message = response.text().await.unwrap_or_default();
                return Err(ProviderError::api_error(status.as_u16(), message));
            }
            _ => {}
        }

        let value: Value = response.json().await?;
        value["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::invalid_response("missing candidates[0] text part"))
    }

    fn provider_id(&self) -> &str {
        "gemini"
    }
}
