//! OpenAI-compatible Chat Completions adapter.

use super::ProviderAdapter;
use super::http::{endpoint, resolve_api_key, send_json};
use crate::config::FileOpenAiConfig;
use async_trait::async_trait;
use guardian_application::ports::llm_gateway::{CompletionRequest, GatewayError};
use guardian_domain::ProviderFamily;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub struct OpenAiAdapter {
    client: Client,
    config: FileOpenAiConfig,
}

impl OpenAiAdapter {
    pub fn new(config: FileOpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn build_request(&self, request: &CompletionRequest) -> Value {
        json!({
            "model": request.model.name(),
            "max_tokens": self.config.max_tokens,
            "messages": [
                {"role": "system", "content": request.system_prompt},
                {"role": "user", "content": request.user_prompt},
            ],
        })
    }

    fn parse_response(response: ChatResponse) -> Result<String, GatewayError> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::InvalidResponse("No choices in response".to_string()))?;

        match choice.message.content {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(GatewayError::EmptyResponse),
        }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn family(&self) -> ProviderFamily {
        ProviderFamily::OpenAi
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
        cancel: CancellationToken,
    ) -> Result<String, GatewayError> {
        let api_key = resolve_api_key(self.config.api_key.as_deref(), &self.config.api_key_env)?;

        debug!("Sending OpenAI request for {}", request.model.name());

        let http_request = self
            .client
            .post(endpoint(&self.config.base_url, "v1/chat/completions"))
            .bearer_auth(api_key)
            .json(&self.build_request(request));

        let response: ChatResponse = send_json(http_request, &cancel).await?;
        Self::parse_response(response)
    }
}

// API response types

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardian_domain::Model;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: Model::new("gpt-4o-mini"),
            system_prompt: "be strict".to_string(),
            user_prompt: "did they ask?".to_string(),
        }
    }

    #[test]
    fn test_build_request() {
        let adapter = OpenAiAdapter::new(FileOpenAiConfig::default());
        let body = adapter.build_request(&request());

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "be strict");
        assert_eq!(body["messages"][1]["content"], "did they ask?");
    }

    #[test]
    fn test_parse_response() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": "ALLOW: read-only"}}]
        }))
        .unwrap();
        assert_eq!(
            OpenAiAdapter::parse_response(response),
            Ok("ALLOW: read-only".to_string())
        );
    }

    #[test]
    fn test_parse_null_content_is_empty() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();
        assert_eq!(
            OpenAiAdapter::parse_response(response),
            Err(GatewayError::EmptyResponse)
        );
    }

    #[test]
    fn test_parse_no_choices() {
        let response: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(
            OpenAiAdapter::parse_response(response),
            Err(GatewayError::InvalidResponse(_))
        ));
    }
}
