//! Fake text generator for testing.
//!
//! Returns canned responses chosen by prompt matching, so tests and offline
//! runs work without network access or API keys.

use crate::error::RecipeError;
use crate::providers::TextGenerator;
use async_trait::async_trait;
use std::sync::RwLock;

/// A deterministic [`TextGenerator`].
///
/// Responses are matched by checking whether the prompt contains a registered
/// substring (case-insensitive, first registered wins). Every prompt received
/// is recorded and can be inspected with [`FakeGenerator::prompts`].
#[derive(Debug, Default)]
pub struct FakeGenerator {
    responses: Vec<(String, String)>,
    default_response: Option<String>,
    image_response: Option<String>,
    prompts: RwLock<Vec<String>>,
}

impl FakeGenerator {
    /// A generator with no responses; every call fails until some are added.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, prompt_contains: &str, response: &str) -> Self {
        self.responses
            .push((prompt_contains.to_lowercase(), response.to_string()));
        self
    }

    /// Response used when no registered substring matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Response returned for any photo.
    pub fn with_image_response(mut self, response: &str) -> Self {
        self.image_response = Some(response.to_string());
        self
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .read()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    fn record(&self, prompt: &str) {
        if let Ok(mut prompts) = self.prompts.write() {
            prompts.push(prompt.to_string());
        }
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    fn provider_name(&self) -> &str {
        "fake"
    }

    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, RecipeError> {
        self.record(prompt);

        let prompt_lower = prompt.to_lowercase();
        self.responses
            .iter()
            .find(|(pattern, _)| prompt_lower.contains(pattern.as_str()))
            .map(|(_, response)| response.clone())
            .or_else(|| self.default_response.clone())
            .ok_or_else(|| {
                RecipeError::ProviderError(format!(
                    "No response configured for prompt (first 100 chars): {}",
                    prompt.chars().take(100).collect::<String>()
                ))
            })
    }

    async fn describe_image(&self, prompt: &str, _image: &[u8]) -> Result<String, RecipeError> {
        self.record(prompt);
        self.image_response.clone().ok_or_else(|| {
            RecipeError::ProviderError("No image response configured".to_string())
        })
    }
}
