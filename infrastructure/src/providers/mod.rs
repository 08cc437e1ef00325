//! Model provider adapters.
//!
//! Each adapter speaks one vendor HTTP API. [`RoutingGateway`] picks the
//! adapter for a model and exposes them all as a single
//! [`LlmGateway`](guardian_application::LlmGateway).

pub mod anthropic;
mod http;
pub mod openai;
pub mod routing;

pub use anthropic::AnthropicAdapter;
pub use openai::OpenAiAdapter;
pub use routing::RoutingGateway;

use async_trait::async_trait;
use guardian_application::ports::llm_gateway::{CompletionRequest, GatewayError};
use guardian_domain::ProviderFamily;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn family(&self) -> ProviderFamily;

    async fn complete(
        &self,
        request: &CompletionRequest,
        cancel: CancellationToken,
    ) -> Result<String, GatewayError>;
}
