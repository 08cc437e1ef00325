//! Anthropic Messages API adapter.

use super::ProviderAdapter;
use super::http::{endpoint, resolve_api_key, send_json};
use crate::config::FileAnthropicConfig;
use async_trait::async_trait;
use guardian_application::ports::llm_gateway::{CompletionRequest, GatewayError};
use guardian_domain::ProviderFamily;
use reqwest::Client;
use reqwest::header::HeaderValue;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub struct AnthropicAdapter {
    client: Client,
    config: FileAnthropicConfig,
}

impl AnthropicAdapter {
    pub fn new(config: FileAnthropicConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn build_request(&self, request: &CompletionRequest) -> Value {
        json!({
            "model": request.model.name(),
            "max_tokens": self.config.max_tokens,
            "system": request.system_prompt,
            "messages": [
                {"role": "user", "content": request.user_prompt},
            ],
        })
    }

    fn parse_response(response: MessagesResponse) -> Result<String, GatewayError> {
        let text = response
            .content
            .into_iter()
            .filter_map(|block| match block {
                ResponseBlock::Text { text } => Some(text),
                ResponseBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            Err(GatewayError::EmptyResponse)
        } else {
            Ok(text)
        }
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn family(&self) -> ProviderFamily {
        ProviderFamily::Anthropic
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
        cancel: CancellationToken,
    ) -> Result<String, GatewayError> {
        let api_key = resolve_api_key(self.config.api_key.as_deref(), &self.config.api_key_env)?;
        let mut api_key_header = HeaderValue::try_from(api_key).map_err(|e| {
            GatewayError::MissingApiKey(format!("{} (invalid: {})", self.config.api_key_env, e))
        })?;
        api_key_header.set_sensitive(true);

        debug!("Sending Anthropic request for {}", request.model.name());

        let http_request = self
            .client
            .post(endpoint(&self.config.base_url, "v1/messages"))
            .header("x-api-key", api_key_header)
            .header("anthropic-version", &self.config.api_version)
            .json(&self.build_request(request));

        let response: MessagesResponse = send_json(http_request, &cancel).await?;
        Self::parse_response(response)
    }
}

// API response types

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardian_domain::Model;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: Model::with_provider("anthropic", "claude-haiku-4-5"),
            system_prompt: "be strict".to_string(),
            user_prompt: "did they ask?".to_string(),
        }
    }

    #[test]
    fn test_build_request() {
        let adapter = AnthropicAdapter::new(FileAnthropicConfig::default());
        let body = adapter.build_request(&request());

        assert_eq!(body["model"], "claude-haiku-4-5");
        assert_eq!(body["max_tokens"], 256);
        assert_eq!(body["system"], "be strict");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "did they ask?");
    }

    #[test]
    fn test_parse_response_joins_text_blocks() {
        let response: MessagesResponse = serde_json::from_value(json!({
            "content": [
                {"type": "thinking", "thinking": "hmm"},
                {"type": "text", "text": "BLOCK: "},
                {"type": "text", "text": "not requested"},
            ]
        }))
        .unwrap();
        assert_eq!(
            AnthropicAdapter::parse_response(response),
            Ok("BLOCK: not requested".to_string())
        );
    }

    #[test]
    fn test_parse_empty_response() {
        let response: MessagesResponse = serde_json::from_value(json!({"content": []})).unwrap();
        assert_eq!(
            AnthropicAdapter::parse_response(response),
            Err(GatewayError::EmptyResponse)
        );
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let adapter = AnthropicAdapter::new(FileAnthropicConfig {
            api_key_env: "INTENT_GUARDIAN_TEST_NEVER_SET".to_string(),
            ..Default::default()
        });
        let result = adapter.complete(&request(), CancellationToken::new()).await;
        assert!(matches!(result, Err(GatewayError::MissingApiKey(_))));
    }
}
