//! Configuration management for numen.
//!
//! Configuration lives at `~/.config/numen/config.json` (XDG conventions
//! via `dirs`). Every field carries a serde default so config files written
//! by older versions pick up newly added settings transparently.

use crate::error::{CoreError, CoreResult};
use numen_util::path;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// AI provider settings.
    pub ai: AiConfig,

    /// Editor settings.
    pub editor: EditorConfig,

    /// Storage locations.
    pub paths: PathsConfig,
}

/// AI provider settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AiConfig {
    /// Provider to use: anthropic, openai, gemini, or ollama.
    pub default_provider: String,

    /// Anthropic API key.
    pub anthropic_api_key: String,

    /// OpenAI API key.
    pub openai_api_key: String,

    /// Google Gemini API key.
    pub gemini_api_key: String,

    /// Base URL for a local Ollama server.
    pub ollama_base_url: String,

    /// Model ID to use with the selected provider.
    pub default_model: String,

    /// Sampling temperature (0.0-1.0).
    pub temperature: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            default_provider: "anthropic".to_string(),
            anthropic_api_key: String::new(),
            openai_api_key: String::new(),
            gemini_api_key: String::new(),
            ollama_base_url: "http://localhost:11434".to_string(),
            default_model: String::new(),
            temperature: 0.7,
        }
    }
}

/// Editor settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// Editor command. Empty means use `$EDITOR`, falling back to nvim.
    pub default: String,
}

/// Storage locations. Paths may start with `~`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding notes. Empty means the platform data dir.
    pub notes_dir: String,

    /// Directory holding version history. Empty means the platform data dir.
    pub history_dir: String,

    /// Directory holding templates. Empty means the platform data dir.
    pub templates_dir: String,
}

impl Config {
    /// Path to the config file.
    pub fn path() -> CoreResult<PathBuf> {
        path::config_dir()
            .map(|p| p.join("config.json"))
            .ok_or_else(|| CoreError::invalid_input("could not determine config directory"))
    }

    /// Load the configuration, creating a default file on first run.
    pub async fn load() -> CoreResult<Self> {
        let path = Self::path()?;

        if !path.exists() {
            let config = Self::default();
            config.save().await?;
            info!(path = %path.display(), "created default configuration");
            return Ok(config);
        }

        let content = tokio::fs::read_to_string(&path).await?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save the configuration.
    pub async fn save(&self) -> CoreResult<()> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(&path, json).await?;
        Ok(())
    }

    /// Resolve the notes directory.
    pub fn notes_dir(&self) -> CoreResult<PathBuf> {
        resolve_dir(&self.paths.notes_dir, path::default_notes_dir())
    }

    /// Resolve the version-history root directory.
    pub fn history_dir(&self) -> CoreResult<PathBuf> {
        resolve_dir(&self.paths.history_dir, path::default_history_dir())
    }

    /// Resolve the templates directory.
    pub fn templates_dir(&self) -> CoreResult<PathBuf> {
        resolve_dir(&self.paths.templates_dir, path::default_templates_dir())
    }

    /// Resolve the editor command: config value, then `$EDITOR`, then nvim.
    pub fn editor(&self) -> String {
        if !self.editor.default.is_empty() {
            return self.editor.default.clone();
        }
        std::env::var("EDITOR").unwrap_or_else(|_| "nvim".to_string())
    }
}

fn resolve_dir(configured: &str, default: Option<PathBuf>) -> CoreResult<PathBuf> {
    if configured.is_empty() {
        return default
            .ok_or_else(|| CoreError::invalid_input("could not determine data directory"));
    }
    Ok(path::expand_tilde(std::path::Path::new(configured)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ai.default_provider, "anthropic");
        assert_eq!(config.ai.ollama_base_url, "http://localhost:11434");
        assert!((config.ai.temperature - 0.7).abs() < f32::EPSILON);
        assert!(config.editor.default.is_empty());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        // Older config files without newer fields still deserialize.
        let json = r#"{"ai": {"default_provider": "ollama"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.ai.default_provider, "ollama");
        assert_eq!(config.ai.ollama_base_url, "http://localhost:11434");
        assert!(config.paths.notes_dir.is_empty());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.ai.default_model = "claude-sonnet-4-20250514".to_string();
        config.paths.notes_dir = "~/notes".to_string();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_configured_dir_expands_tilde() {
        let config = Config {
            paths: PathsConfig {
                notes_dir: "~/my-notes".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let dir = config.notes_dir().unwrap();
        assert!(dir.ends_with("my-notes"));
        assert!(!dir.to_string_lossy().contains('~'));
    }
}
