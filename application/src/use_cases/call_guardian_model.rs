//! Gateway-backed guardian model.
//!
//! [`GatewayGuardianModel`] implements the never-failing
//! [`GuardianModel`] contract on top of any [`LlmGateway`]: it races the
//! request against the configured timeout, cancels the request when the
//! timer wins, and folds every failure into the fallback decision with a
//! cause-specific reason.

use crate::ports::guardian_model::{GuardianModel, GuardianModelRequest};
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use async_trait::async_trait;
use guardian_domain::{FallbackPolicy, GuardianDecision, parse_verdict};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub struct GatewayGuardianModel {
    gateway: Arc<dyn LlmGateway>,
}

impl GatewayGuardianModel {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }
}

fn fallback(policy: FallbackPolicy, cause: impl std::fmt::Display) -> GuardianDecision {
    GuardianDecision::fallback(policy, format!("Guardian {} (fallback: {})", cause, policy))
}

#[async_trait]
impl GuardianModel for GatewayGuardianModel {
    async fn call(&self, request: &GuardianModelRequest) -> GuardianDecision {
        let completion = CompletionRequest {
            model: request.model.clone(),
            system_prompt: request.system_prompt.clone(),
            user_prompt: request.user_prompt.clone(),
        };

        // Cancelled on every exit path when the guard drops.
        let cancel = CancellationToken::new();
        let _cancel_guard = cancel.clone().drop_guard();

        let outcome = tokio::select! {
            result = self.gateway.complete(&completion, cancel.child_token()) => Some(result),
            _ = tokio::time::sleep(request.timeout) => None,
        };

        let policy = request.fallback;
        match outcome {
            None => {
                warn!(
                    "Guardian model {} timed out after {}ms",
                    request.model,
                    request.timeout.as_millis()
                );
                fallback(
                    policy,
                    format!("timed out after {}ms", request.timeout.as_millis()),
                )
            }
            Some(Err(GatewayError::HttpStatus { status, body })) => {
                warn!("Guardian model {} returned HTTP {}: {}", request.model, status, body);
                fallback(policy, format!("request failed with HTTP {}", status))
            }
            Some(Err(GatewayError::EmptyResponse)) => {
                warn!("Guardian model {} returned an empty response", request.model);
                fallback(policy, "returned an empty response")
            }
            Some(Err(e)) => {
                warn!("Guardian model {} failed: {}", request.model, e);
                fallback(policy, format!("request failed: {}", e))
            }
            Some(Ok(text)) if text.trim().is_empty() => {
                warn!("Guardian model {} returned an empty response", request.model);
                fallback(policy, "returned an empty response")
            }
            Some(Ok(text)) => {
                debug!("Guardian model {} responded: {}", request.model, text.trim());
                parse_verdict(&text, &fallback(policy, "response not recognized"))
            }
        }
    }
}
