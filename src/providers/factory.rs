use crate::config::{AppConfig, ProviderConfig};
use crate::error::RecipeError;
use crate::providers::{AnthropicProvider, OpenAIProvider, TextGenerator};

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout_secs: u64,
    ) -> Result<Box<dyn TextGenerator>, RecipeError> {
        if !config.enabled {
            return Err(RecipeError::ProviderError(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )));
        }

        match provider_name {
            "openai" => Ok(Box::new(OpenAIProvider::new(config, timeout_secs)?)),
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config, timeout_secs)?)),
            _ => Err(RecipeError::ProviderError(format!(
                "Unknown provider: {}",
                provider_name
            ))),
        }
    }

    /// Get the default provider from configuration
    pub fn get_default_provider(config: &AppConfig) -> Result<Box<dyn TextGenerator>, RecipeError> {
        let provider_name = &config.default_provider;
        let provider_config = config.providers.get(provider_name).ok_or_else(|| {
            RecipeError::ProviderError(format!(
                "Default provider '{}' not found in configuration",
                provider_name
            ))
        })?;

        Self::create(provider_name, provider_config, config.timeout)
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["openai", "anthropic"]
    }
}
