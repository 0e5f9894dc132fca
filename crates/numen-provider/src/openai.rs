//! OpenAI provider implementation.

use crate::{
    error::ProviderError, GenerateOptions, ProviderResult, TextProvider, DEFAULT_MAX_TOKENS,
    SYSTEM_PROMPT,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{json, Value};
use tracing::{debug, warn};

/// The OpenAI API base URL.
const OPENAI_API_URL: &str = "https://api.openai.com";

/// Model used when the configured model is empty or not a GPT model.
const DEFAULT_MODEL: &str = "gpt-4-turbo";

/// OpenAI provider.
pub struct OpenAiProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider with API key.
    pub fn new(api_key: &str, model: &str) -> ProviderResult<Self> {
        Self::with_base_url(api_key, OPENAI_API_URL, model)
    }

    /// Create a new OpenAI provider with a custom base URL.
    pub fn with_base_url(api_key: &str, base_url: &str, model: &str) -> ProviderResult<Self> {
        if api_key.is_empty() {
            return Err(ProviderError::missing_api_key("openai"));
        }

        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {api_key}");
        headers.insert(
            reqwest::header::AUTHORIZATION,
            HeaderValue::from_str(&bearer).map_err(|_| ProviderError::invalid_api_key("openai"))?,
        );

        // A model left over from another provider is silently replaced.
        let model = if model.to_lowercase().contains("gpt") {
            model
        } else {
            if !model.is_empty() {
                warn!(model, "model is not a GPT model, using {DEFAULT_MODEL}");
            }
            DEFAULT_MODEL
        };
        debug!(model, "creating OpenAI provider");

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
impl TextProvider for OpenAiProvider {
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> ProviderResult<String> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": options.system.as_deref().unwrap_or(SYSTEM_PROMPT) },
                { "role": "user", "content": prompt },
            ],
            "temperature": options.temperature.unwrap_or(0.7),
            "max_tokens": options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        });

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        match status.as_u16() {
            401 => return Err(ProviderError::invalid_api_key("openai")),
            429 => return Err(ProviderError::RateLimited),
            _ if !status.is_success() => {
                let message = response.text().await.unwrap_or_default();
                return Err(ProviderError::api_error(status.as_u16(), message));
            }
            _ => {}
        }

        let value: Value = response.json().await?;
        value["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::invalid_response("missing choices[0].message.content"))
    }

    fn provider_id(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_generate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "summary" } }]
            })))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::with_base_url("key", &server.uri(), "gpt-4o").unwrap();
        let result = provider
            .generate("summarize", &GenerateOptions::default())
            .await
            .unwrap();
        assert_eq!(result, "summary");
    }

    #[tokio::test]
    async fn test_non_gpt_model_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": DEFAULT_MODEL})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "content": "ok" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider =
            OpenAiProvider::with_base_url("key", &server.uri(), "claude-3-sonnet").unwrap();
        provider
            .generate("x", &GenerateOptions::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_api_error_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::with_base_url("key", &server.uri(), "gpt-4o").unwrap();
        let err = provider
            .generate("x", &GenerateOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::ApiError { status: 500, .. }));
    }
}
