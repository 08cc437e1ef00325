use super::ProviderAdapter;
use async_trait::async_trait;
use guardian_application::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use guardian_domain::{Model, ProviderFamily};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub struct RoutingGateway {
    providers: Vec<Arc<dyn ProviderAdapter>>,
    /// Model reference (full `provider/name` or bare name) to provider index.
    explicit_model_routing: HashMap<String, usize>,
    default_family: Option<ProviderFamily>,
}

impl RoutingGateway {
    pub fn new(
        providers: Vec<Arc<dyn ProviderAdapter>>,
        routing: &HashMap<String, ProviderFamily>,
        default_family: Option<ProviderFamily>,
    ) -> Self {
        let explicit_model_routing = routing
            .iter()
            .filter_map(|(model, family)| {
                providers
                    .iter()
                    .position(|p| p.family() == *family)
                    .map(|idx| (model.clone(), idx))
            })
            .collect();

        Self {
            providers,
            explicit_model_routing,
            default_family,
        }
    }

    /// Routing priority:
    ///  1. explicit routing entry for the full reference, then the bare name
    ///  2. provider prefix or model family
    ///  3. configured default provider
    ///  4. first registered provider
    ///  5. none registered: [`GatewayError::ModelNotAvailable`]
    fn resolve_provider(&self, model: &Model) -> Result<&dyn ProviderAdapter, GatewayError> {
        let explicit = self
            .explicit_model_routing
            .get(&model.to_string())
            .or_else(|| self.explicit_model_routing.get(model.name()));
        if let Some(&idx) = explicit {
            return Ok(self.providers[idx].as_ref());
        }

        for family in [model.family(), self.default_family].into_iter().flatten() {
            if let Some(p) = self.providers.iter().find(|p| p.family() == family) {
                return Ok(p.as_ref());
            }
        }

        self.providers
            .first()
            .map(|p| p.as_ref())
            .ok_or_else(|| GatewayError::ModelNotAvailable(model.to_string()))
    }
}

#[async_trait]
impl LlmGateway for RoutingGateway {
    async fn complete(
        &self,
        request: &CompletionRequest,
        cancel: CancellationToken,
    ) -> Result<String, GatewayError> {
        let provider = self.resolve_provider(&request.model)?;
        debug!("Routing {} to {}", request.model, provider.family());
        provider.complete(request, cancel).await
    }
}
