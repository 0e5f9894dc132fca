//! Anthropic (Claude) provider implementation.

use crate::{
    error::ProviderError, GenerateOptions, ProviderResult, TextProvider, DEFAULT_MAX_TOKENS,
    SYSTEM_PROMPT,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{json, Value};
use tracing::debug;

/// The Anthropic API base URL.
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";

/// The Anthropic API version.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Model used when the configured model is empty.
const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";

/// Anthropic (Claude) provider.
#[derive(Debug)]
pub struct AnthropicProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider with API key.
    pub fn new(api_key: &str, model: &str) -> ProviderResult<Self> {
        Self::with_base_url(api_key, ANTHROPIC_API_URL, model)
    }

    /// Create a new Anthropic provider with a custom base URL.
    pub fn with_base_url(api_key: &str, base_url: &str, model: &str) -> ProviderResult<Self> {
        if api_key.is_empty() {
            return Err(ProviderError::missing_api_key("anthropic"));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|_| ProviderError::invalid_api_key("anthropic"))?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let model = if model.is_empty() {
            DEFAULT_MODEL
        } else {
            model
        };
        debug!(model, "creating Anthropic provider");

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl TextProvider for AnthropicProvider {
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> ProviderResult<String> {
        let body = json!({
            "model": self.model,
            "max_tokens": options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            "temperature": options.temperature.unwrap_or(0.7),
            "system": options.system.as_deref().unwrap_or(SYSTEM_PROMPT),
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        match status.as_u16() {
            401 => return Err(ProviderError::invalid_api_key("anthropic")),
            429 => return Err(ProviderError::RateLimited),
            _ if !status.is_success() => {
                let message = response.text().await.unwrap_or_default();
                return Err(ProviderError::api_error(status.as_u16(), message));
            }
            _ => {}
        }

        let value: Value = response.json().await?;
        value["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::invalid_response("missing content[0].text"))
    }

    fn provider_id(&self) -> &str {
        "anthropic"
    }
}
