//! Shared HTTP plumbing for provider adapters.

use guardian_application::ports::llm_gateway::GatewayError;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

/// Inline key first, then the named environment variable.
pub(super) fn resolve_api_key(
    inline: Option<&str>,
    env_var: &str,
) -> Result<String, GatewayError> {
    if let Some(key) = inline.map(str::trim).filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }
    std::env::var(env_var)
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| GatewayError::MissingApiKey(env_var.to_string()))
}

/// Join a base URL and an API path without doubling slashes.
pub(super) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Send the request and decode a JSON body, aborting as soon as `cancel` fires.
pub(super) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    cancel: &CancellationToken,
) -> Result<T, GatewayError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(GatewayError::Cancelled),
        result = exchange(request) => result,
    }
}

async fn exchange<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, GatewayError> {
    let response = request
        .send()
        .await
        .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
}
