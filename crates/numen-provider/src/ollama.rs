//! Ollama provider implementation for local models.

use crate::{error::ProviderError, GenerateOptions, ProviderResult, TextProvider, SYSTEM_PROMPT};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Default local Ollama endpoint.
const OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Model used when the configured model is empty or belongs to a hosted
/// provider.
const DEFAULT_MODEL: &str = "llama3";

/// Ollama provider. Requires a running local Ollama server; no API key.
pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider. An empty base URL means the default
    /// local endpoint.
    pub fn new(base_url: &str, model: &str) -> Self {
        let base_url = if base_url.is_empty() {
            OLLAMA_BASE_URL
        } else {
            base_url
        };

        let lowered = model.to_lowercase();
        let model = if model.is_empty() || lowered.contains("claude") || lowered.contains("gpt") {
            if !model.is_empty() {
                warn!(model, "model is not a local model, using {DEFAULT_MODEL}");
            }
            DEFAULT_MODEL
        } else {
            model
        };
        debug!(model, base_url, "creating Ollama provider");

        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl TextProvider for OllamaProvider {
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> ProviderResult<String> {
        let full_prompt = format!(
            "{}\n\n{prompt}",
            options.system.as_deref().unwrap_or(SYSTEM_PROMPT)
        );
        let body = json!({
            "model": self.model,
            "prompt": full_prompt,
            "temperature": options.temperature.unwrap_or(0.7),
            "stream": false,
        });

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::api_error(status.as_u16(), message));
        }

        let value: Value = response.json().await?;
        value["response"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::invalid_response("missing response field"))
    }

    fn provider_id(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_generate_disables_streaming() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(json!({"stream": false})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "response": "local output" })),
            )
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(&server.uri(), "mistral");
        let result = provider
            .generate("hello", &GenerateOptions::default())
            .await
            .unwrap();
        assert_eq!(result, "local output");
    }

    #[tokio::test]
    async fn test_hosted_model_falls_back_to_local() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": DEFAULT_MODEL})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "ok" })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(&server.uri(), "gpt-4-turbo");
        provider
            .generate("x", &GenerateOptions::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(&server.uri(), "llama3");
        let err = provider
            .generate("x", &GenerateOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::ApiError { status: 500, .. }));
    }
}
