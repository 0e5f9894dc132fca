//! AI provider abstraction for numen.
//!
//! This crate provides a unified interface for generating text with
//! different AI providers:
//! - Anthropic (Claude)
//! - OpenAI
//! - Google (Gemini)
//! - Ollama (local models)

pub mod error;
pub mod prompt;

pub mod anthropic;
pub mod gemini;
pub mod ollama;
pub mod openai;

// Testing providers
pub mod test;

pub use error::{ProviderError, ProviderResult};
pub use prompt::Transform;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// System prompt shared by all providers.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful writing assistant that helps expand, summarize, or transform text.";

/// Default token budget for a single generation.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Options for text generation.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Temperature for sampling (0.0-1.0).
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// System prompt override.
    pub system: Option<String>,
}

/// The main trait for text generation providers.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a completion for a prompt.
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> ProviderResult<String>;

    /// Get the provider ID (e.g., "anthropic", "openai").
    fn provider_id(&self) -> &str;
}

/// A boxed provider for dynamic dispatch.
pub type BoxedTextProvider = Arc<dyn TextProvider>;

/// Connection settings for building a provider, decoupled from the
/// application's config format.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    /// Provider name: anthropic, openai, gemini, or ollama.
    pub provider: String,
    /// Anthropic API key.
    pub anthropic_api_key: String,
    /// OpenAI API key.
    pub openai_api_key: String,
    /// Google Gemini API key.
    pub gemini_api_key: String,
    /// Base URL for a local Ollama server.
    pub ollama_base_url: String,
    /// Model ID; empty means the provider's default.
    pub model: String,
}

/// Create a provider from settings.
///
/// An unknown provider name logs a warning and falls back to Anthropic.
pub fn create_provider(settings: &ProviderSettings) -> ProviderResult<BoxedTextProvider> {
    match settings.provider.to_lowercase().as_str() {
        "anthropic" => Ok(Arc::new(anthropic::AnthropicProvider::new(
            &settings.anthropic_api_key,
            &settings.model,
        )?)),
        "openai" => Ok(Arc::new(openai::OpenAiProvider::new(
            &settings.openai_api_key,
            &settings.model,
        )?)),
        "gemini" => Ok(Arc::new(gemini::GeminiProvider::new(
            &settings.gemini_api_key,
            &settings.model,
        )?)),
        "ollama" => Ok(Arc::new(ollama::OllamaProvider::new(
            &settings.ollama_base_url,
            &settings.model,
        ))),
        other => {
            warn!(provider = other, "unknown provider, falling back to anthropic");
            Ok(Arc::new(anthropic::AnthropicProvider::new(
                &settings.anthropic_api_key,
                &settings.model,
            )?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_dispatch() {
        let settings = ProviderSettings {
            provider: "ollama".to_string(),
            ..Default::default()
        };
        let provider = create_provider(&settings).unwrap();
        assert_eq!(provider.provider_id(), "ollama");
    }

    #[test]
    fn test_unknown_provider_falls_back_to_anthropic() {
        let settings = ProviderSettings {
            provider: "mystery".to_string(),
            anthropic_api_key: "key".to_string(),
            ..Default::default()
        };
        let provider = create_provider(&settings).unwrap();
        assert_eq!(provider.provider_id(), "anthropic");
    }

    #[test]
    fn test_missing_key_propagates() {
        let settings = ProviderSettings {
            provider: "openai".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            create_provider(&settings),
            Err(ProviderError::MissingApiKey(_))
        ));
    }
}
