//! LLM Gateway port
//!
//! Defines the interface for sending a single completion request to a model
//! provider. Implementations (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use guardian_domain::Model;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Empty response")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing API key (set {0})")]
    MissingApiKey(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request cancelled")]
    Cancelled,
}

/// A single-shot completion: one system prompt, one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: Model,
    pub system_prompt: String,
    pub user_prompt: String,
}

/// Gateway for LLM communication
///
/// Implementations must stop work and return [`GatewayError::Cancelled`]
/// once `cancel` fires.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send the request and return the model's text output.
    async fn complete(
        &self,
        request: &CompletionRequest,
        cancel: CancellationToken,
    ) -> Result<String, GatewayError>;
}
