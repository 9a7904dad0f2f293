use crate::config::AppConfig;
use crate::error::RecipeError;
use crate::providers::{ProviderFactory, TextGenerator};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::time::Duration;
use tokio::time::sleep;

/// One call to forward to each provider in turn
#[derive(Clone, Copy)]
enum Call<'a> {
    Complete { prompt: &'a str, system: &'a str },
    DescribeImage { prompt: &'a str, image: &'a [u8] },
}

impl Call<'_> {
    async fn run(self, provider: &dyn TextGenerator) -> Result<String, RecipeError> {
        match self {
            Call::Complete { prompt, system } => provider.complete(prompt, system).await,
            Call::DescribeImage { prompt, image } => provider.describe_image(prompt, image).await,
        }
    }
}

pub struct FallbackProvider {
    providers: Vec<Box<dyn TextGenerator>>,
    retry_attempts: u32,
    retry_delay_ms: u64,
}

impl FallbackProvider {
    /// Create a new fallback provider from configuration
    pub fn new(config: &AppConfig) -> Result<Self, RecipeError> {
        if !config.fallback.enabled {
            let default_provider = ProviderFactory::get_default_provider(config)?;
            return Ok(FallbackProvider {
                providers: vec![default_provider],
                retry_attempts: 1,
                retry_delay_ms: 0,
            });
        }

        let mut providers = Vec::new();

        for provider_name in &config.fallback.order {
            if let Some(provider_config) = config.providers.get(provider_name) {
                if provider_config.enabled {
                    match ProviderFactory::create(provider_name, provider_config, config.timeout) {
                        Ok(provider) => {
                            info!("Added '{}' to fallback chain", provider_name);
                            providers.push(provider);
                        }
                        Err(e) => {
                            warn!("Failed to initialize provider '{}': {}", provider_name, e);
                        }
                    }
                }
            } else {
                warn!(
                    "Provider '{}' in fallback order not found in configuration",
                    provider_name
                );
            }
        }

        if providers.is_empty() {
            return Err(RecipeError::ProviderError(
                "No providers available in fallback configuration".to_string(),
            ));
        }

        Ok(FallbackProvider {
            providers,
            retry_attempts: config.fallback.retry_attempts.max(1),
            retry_delay_ms: config.fallback.retry_delay_ms,
        })
    }

    /// Chain already-built providers.
    pub fn from_providers(
        providers: Vec<Box<dyn TextGenerator>>,
        retry_attempts: u32,
        retry_delay_ms: u64,
    ) -> Self {
        FallbackProvider {
            providers,
            retry_attempts: retry_attempts.max(1),
            retry_delay_ms,
        }
    }

    /// Try a provider, waiting a little longer after each failed attempt
    async fn try_provider_with_retry(
        &self,
        provider: &dyn TextGenerator,
        call: Call<'_>,
    ) -> Result<String, String> {
        let mut last_error = String::new();

        for attempt in 1..=self.retry_attempts {
            debug!(
                "Attempting generation with {} (attempt {}/{})",
                provider.provider_name(),
                attempt,
                self.retry_attempts
            );

            match call.run(provider).await {
                Ok(result) => {
                    info!("Generated text using {}", provider.provider_name());
                    return Ok(result);
                }
                Err(e) => {
                    warn!(
                        "Provider {} failed (attempt {}/{}): {}",
                        provider.provider_name(),
                        attempt,
                        self.retry_attempts,
                        e
                    );
                    last_error = e.to_string();
                }
            }

            if attempt < self.retry_attempts {
                let delay = Duration::from_millis(self.retry_delay_ms * attempt as u64);
                debug!("Waiting {:?} before retry", delay);
                sleep(delay).await;
            }
        }

        Err(last_error)
    }

    async fn run_chain(&self, call: Call<'_>) -> Result<String, RecipeError> {
        let mut all_errors: Vec<String> = Vec::new();

        for provider in &self.providers {
            match self.try_provider_with_retry(provider.as_ref(), call).await {
                Ok(result) => return Ok(result),
                Err(e) => all_errors.push(format!("{}: {}", provider.provider_name(), e)),
            }
        }

        Err(RecipeError::ProviderError(format!(
            "All providers failed:\n{}",
            all_errors.join("\n")
        )))
    }
}

#[async_trait]
impl TextGenerator for FallbackProvider {
    fn provider_name(&self) -> &str {
        "fallback"
    }

    async fn complete(&self, prompt: &str, system: &str) -> Result<String, RecipeError> {
        self.run_chain(Call::Complete { prompt, system }).await
    }

    async fn describe_image(&self, prompt: &str, image: &[u8]) -> Result<String, RecipeError> {
        self.run_chain(Call::DescribeImage { prompt, image }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FallbackConfig;
    use crate::providers::factory::tests::{app_config, provider_config};
    use crate::providers::FakeGenerator;
    use std::collections::HashMap;

    fn fallback_config() -> AppConfig {
        let mut providers = HashMap::new();
        providers.insert("openai".to_string(), provider_config("gpt-4o-mini"));
        let mut config = app_config(providers);
        config.fallback = FallbackConfig {
            enabled: true,
            order: vec!["openai".to_string()],
            retry_attempts: 3,
            retry_delay_ms: 100,
        };
        config
    }

    #[test]
    fn test_fallback_provider_creation() {
        let fallback = FallbackProvider::new(&fallback_config()).unwrap();
        assert_eq!(fallback.provider_name(), "fallback");
        assert_eq!(fallback.providers.len(), 1);
    }

    #[test]
    fn test_fallback_disabled() {
        let mut config = fallback_config();
        config.fallback.enabled = false;

        let fallback = FallbackProvider::new(&config).unwrap();
        assert_eq!(fallback.providers.len(), 1);
        assert_eq!(fallback.retry_attempts, 1);
    }

    #[test]
    fn test_fallback_no_providers() {
        let mut config = fallback_config();
        config.providers.clear();

        match FallbackProvider::new(&config) {
            Err(e) => assert!(e.to_string().contains("No providers available")),
            Ok(_) => panic!("empty chain should fail"),
        }
    }

    #[test]
    fn test_fallback_multiple_providers() {
        let mut config = fallback_config();
        config
            .providers
            .insert("anthropic".to_string(), provider_config("claude-sonnet-4-5"));
        config.fallback.order = vec!["openai".to_string(), "anthropic".to_string()];

        let fallback = FallbackProvider::new(&config).unwrap();
        assert_eq!(fallback.providers.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_falls_through_to_next_provider() {
        let failing = FakeGenerator::new();
        let working = FakeGenerator::new().with_default_response("# Soup");
        let fallback =
            FallbackProvider::from_providers(vec![Box::new(failing), Box::new(working)], 2, 50);

        let result = fallback.complete("dinner?", "system").await.unwrap();
        assert_eq!(result, "# Soup");
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_providers_fail() {
        let fallback = FallbackProvider::from_providers(
            vec![Box::new(FakeGenerator::new()), Box::new(FakeGenerator::new())],
            2,
            50,
        );

        match fallback.complete("dinner?", "system").await {
            Err(RecipeError::ProviderError(msg)) => {
                assert!(msg.starts_with("All providers failed"));
                assert_eq!(msg.matches("fake:").count(), 2);
            }
            other => panic!("expected provider error, got {:?}", other),
        }
    }
}
