mod anthropic;
mod factory;
mod fake;
mod fallback;
mod open_ai;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use fake::FakeGenerator;
pub use fallback::FallbackProvider;
pub use open_ai::OpenAIProvider;

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::error::RecipeError;

/// Unified trait for all text generation backends
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Generate a completion for `prompt` under the given system message.
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, RecipeError>;

    /// Answer `prompt` about a photo. Providers without vision support
    /// return an error.
    async fn describe_image(&self, _prompt: &str, _image: &[u8]) -> Result<String, RecipeError> {
        Err(RecipeError::ProviderError(format!(
            "{} does not support image input",
            self.provider_name()
        )))
    }
}

pub(crate) fn http_client(timeout_secs: u64) -> Result<Client, RecipeError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Media type of an uploaded photo, sniffed from its leading bytes.
pub(crate) fn image_media_type(image: &[u8]) -> &'static str {
    match image {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "image/jpeg",
    }
}
