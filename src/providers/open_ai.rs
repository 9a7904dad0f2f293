use crate::config::ProviderConfig;
use crate::error::RecipeError;
use crate::providers::{http_client, image_media_type, TextGenerator};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use log::debug;
use reqwest::{Client, Response};
use serde_json::{json, Value};

const DEFAULT_VISION_MODEL: &str = "gpt-4o";
const VISION_MAX_TOKENS: u32 = 500;

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    vision_model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(config: &ProviderConfig, timeout_secs: u64) -> Result<Self, RecipeError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                RecipeError::ProviderError(
                    "OPENAI_API_KEY not found in config or environment".to_string(),
                )
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com".to_string());

        Ok(OpenAIProvider {
            client: http_client(timeout_secs)?,
            api_key,
            base_url,
            model: config.model.clone(),
            vision_model: config
                .vision_model
                .clone()
                .unwrap_or_else(|| DEFAULT_VISION_MODEL.to_string()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAIProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 1500,
        }
    }

    async fn chat(&self, body: Value) -> Result<String, RecipeError> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let response_body = checked_json(response).await?;
        debug!("{:?}", response_body);
        response_body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                RecipeError::ProviderError("Failed to extract content from response".to_string())
            })
    }
}

pub(crate) async fn checked_json(response: Response) -> Result<Value, RecipeError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RecipeError::ProviderError(format!(
            "API returned {}: {}",
            status, body
        )));
    }
    Ok(response.json().await?)
}

#[async_trait]
impl TextGenerator for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, prompt: &str, system: &str) -> Result<String, RecipeError> {
        self.chat(json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": prompt}
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens
        }))
        .await
    }

    async fn describe_image(&self, prompt: &str, image: &[u8]) -> Result<String, RecipeError> {
        let data_url = format!(
            "data:{};base64,{}",
            image_media_type(image),
            STANDARD.encode(image)
        );

        self.chat(json!({
            "model": self.vision_model,
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "text", "text": prompt},
                    {"type": "image_url", "image_url": {"url": data_url}}
                ]
            }],
            "max_tokens": VISION_MAX_TOKENS
        }))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn provider(url: String) -> OpenAIProvider {
        OpenAIProvider::with_base_url("fake_api_key".to_string(), url, "gpt-4o-mini".to_string())
    }

    #[tokio::test]
    async fn test_complete() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer fake_api_key")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "You are a helpful chef assistant."},
                    {"role": "user", "content": "Suggest a Thai dinner"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r##"{
                    "choices": [{
                        "message": {
                            "content": "# Green Curry\n\n## Ingredients\n- curry paste"
                        }
                    }]
                }"##,
            )
            .create_async()
            .await;

        let result = provider(server.url())
            .complete("Suggest a Thai dinner", "You are a helpful chef assistant.")
            .await
            .unwrap();
        assert!(result.starts_with("# Green Curry"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Invalid request"}"#)
            .create_async()
            .await;

        let result = provider(server.url()).complete("prompt", "system").await;
        match result {
            Err(RecipeError::ProviderError(msg)) => assert!(msg.contains("Invalid request")),
            other => panic!("expected provider error, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_describe_image_sends_data_url() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(json!({"model": "gpt-4o", "max_tokens": 500})),
                Matcher::Regex("data:image/png;base64,".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"message": {"content": "eggs, spinach"}}]}"#)
            .create_async()
            .await;

        let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a];
        let result = provider(server.url())
            .describe_image("List the ingredients", &png)
            .await
            .unwrap();
        assert_eq!(result, "eggs, spinach");
        mock.assert_async().await;
    }

    #[test]
    fn test_provider_name() {
        let provider = provider("http://localhost".to_string());
        assert_eq!(provider.provider_name(), "openai");
    }
}
