//! Test provider for offline testing.
//!
//! Returns canned responses without any network access, so command
//! handlers and integration tests can exercise the AI paths
//! deterministically.

use crate::{GenerateOptions, ProviderResult, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// Test provider returning a fixed reply and recording prompts.
pub struct TestProvider {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl TestProvider {
    /// Create a test provider that always replies with `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextProvider for TestProvider {
    async fn generate(&self, prompt: &str, _options: &GenerateOptions) -> ProviderResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }

    fn provider_id(&self) -> &str {
        "test"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_prompts() {
        let provider = TestProvider::new("canned");
        let reply = provider
            .generate("first", &GenerateOptions::default())
            .await
            .unwrap();
        assert_eq!(reply, "canned");
        assert_eq!(provider.prompts(), vec!["first".to_string()]);
    }
}
