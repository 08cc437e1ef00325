//! Review Tool Call use case.
//!
//! The review pipeline for one candidate tool invocation, written as an
//! explicit state machine. States are resolved in precedence order and each
//! has its own decision function:
//!
//! | State | Condition | Model call | Cache write |
//! |-------|-----------|------------|-------------|
//! | [`ReviewState::Unwatched`] | tool not in the watched set | no | no |
//! | [`ReviewState::CacheHit`] | live verdict for (session, tool) | no | no |
//! | [`ReviewState::NoContext`] | unresolved session with no turns | no | no |
//! | [`ReviewState::Reviewed`] | everything else | yes | yes |
//!
//! Mode is applied last and uniformly: a block decision only blocks the call
//! under enforce mode.

use crate::cache::GuardianCaches;
use crate::config::GuardianConfig;
use crate::ports::decision_logger::{DecisionEvent, DecisionLogger, NoDecisionLogger};
use crate::ports::guardian_model::{GuardianModel, GuardianModelRequest};
use crate::use_cases::shared::{SessionKey, resolve_session_key};
use guardian_domain::util::truncate_str;
use guardian_domain::{
    ConversationTurn, DEFAULT_BLOCK_REASON, GuardianDecision, GuardianPromptTemplate,
    ToolCallRequest,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Which path a review took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewState {
    Unwatched,
    CacheHit,
    NoContext,
    Reviewed,
}

impl ReviewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewState::Unwatched => "unwatched",
            ReviewState::CacheHit => "cache_hit",
            ReviewState::NoContext => "no_context",
            ReviewState::Reviewed => "reviewed",
        }
    }
}

impl std::fmt::Display for ReviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State plus whatever was read while resolving it.
enum ResolvedState {
    Unwatched,
    CacheHit(GuardianDecision),
    NoContext,
    Reviewed(Vec<ConversationTurn>),
}

/// Result of one review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub state: ReviewState,
    /// The verdict, `None` for unwatched tools.
    pub decision: Option<GuardianDecision>,
    /// Set only when the call must not run.
    pub block_reason: Option<String>,
}

impl ReviewOutcome {
    fn no_opinion() -> Self {
        Self {
            state: ReviewState::Unwatched,
            decision: None,
            block_reason: None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.block_reason.is_some()
    }
}

/// Use case for reviewing a tool call before it runs.
pub struct ReviewToolCallUseCase {
    config: GuardianConfig,
    caches: Arc<GuardianCaches>,
    model: Arc<dyn GuardianModel>,
    decision_logger: Arc<dyn DecisionLogger>,
}

impl ReviewToolCallUseCase {
    pub fn new(
        config: GuardianConfig,
        caches: Arc<GuardianCaches>,
        model: Arc<dyn GuardianModel>,
    ) -> Self {
        Self {
            config,
            caches,
            model,
            decision_logger: Arc::new(NoDecisionLogger),
        }
    }

    /// Create with a decision logger.
    pub fn with_decision_logger(mut self, logger: Arc<dyn DecisionLogger>) -> Self {
        self.decision_logger = logger;
        self
    }

    pub fn config(&self) -> &GuardianConfig {
        &self.config
    }

    /// Review the call. Never fails.
    pub async fn execute(&self, request: &ToolCallRequest) -> ReviewOutcome {
        let tool_name = request.normalized_name();
        let session = resolve_session_key(request.session_key.as_deref());

        match self.resolve_state(&tool_name, &session) {
            ResolvedState::Unwatched => self.decide_unwatched(&tool_name),
            ResolvedState::CacheHit(decision) => self.decide_cache_hit(request, &session, decision),
            ResolvedState::NoContext => self.decide_no_context(request, &session),
            ResolvedState::Reviewed(turns) => self.decide_reviewed(request, &session, turns).await,
        }
    }

    fn resolve_state(&self, tool_name: &str, session: &SessionKey) -> ResolvedState {
        if !self.config.watched_tools.contains(tool_name) {
            return ResolvedState::Unwatched;
        }

        if let Some(cached) = self.caches.decisions().get(&session.key, tool_name) {
            return ResolvedState::CacheHit(cached.decision);
        }

        let turns = self.caches.turns().get(&session.key);
        if !session.resolved && turns.is_empty() {
            return ResolvedState::NoContext;
        }

        ResolvedState::Reviewed(turns)
    }

    // ==================== Decision functions ====================

    fn decide_unwatched(&self, tool_name: &str) -> ReviewOutcome {
        debug!("Tool {} is not watched, skipping review", tool_name);
        ReviewOutcome::no_opinion()
    }

    fn decide_cache_hit(
        &self,
        request: &ToolCallRequest,
        session: &SessionKey,
        decision: GuardianDecision,
    ) -> ReviewOutcome {
        debug!(
            "Reusing cached verdict for {} in session {}",
            request.tool_name, session.key
        );
        self.finish(ReviewState::CacheHit, request, session, None, decision)
    }

    fn decide_no_context(&self, request: &ToolCallRequest, session: &SessionKey) -> ReviewOutcome {
        let policy = self.config.fallback_on_error;
        let decision = GuardianDecision::fallback(
            policy,
            format!(
                "No conversation context for this session (fallback: {})",
                policy
            ),
        );
        self.finish(ReviewState::NoContext, request, session, None, decision)
    }

    async fn decide_reviewed(
        &self,
        request: &ToolCallRequest,
        session: &SessionKey,
        turns: Vec<ConversationTurn>,
    ) -> ReviewOutcome {
        let model_request = GuardianModelRequest {
            model: self.config.model.clone(),
            system_prompt: GuardianPromptTemplate::system().to_string(),
            user_prompt: GuardianPromptTemplate::review(
                &turns,
                &request.tool_name,
                &request.args,
                self.config.max_arg_length,
            ),
            timeout: self.config.timeout,
            fallback: self.config.fallback_on_error,
        };

        let decision = self.model.call(&model_request).await;

        self.caches
            .decisions()
            .insert(&session.key, &request.tool_name, decision.clone());

        self.finish(ReviewState::Reviewed, request, session, Some(turns), decision)
    }

    // ==================== Mode and logging ====================

    fn finish(
        &self,
        state: ReviewState,
        request: &ToolCallRequest,
        session: &SessionKey,
        turns: Option<Vec<ConversationTurn>>,
        decision: GuardianDecision,
    ) -> ReviewOutcome {
        let enforced = decision.is_block() && self.config.mode.is_enforcing();

        if self.config.log_decisions {
            self.log_decision(state, request, session, turns, &decision, enforced);
        }

        let block_reason = enforced.then(|| decision.reason_or(DEFAULT_BLOCK_REASON).to_string());
        ReviewOutcome {
            state,
            decision: Some(decision),
            block_reason,
        }
    }

    fn log_decision(
        &self,
        state: ReviewState,
        request: &ToolCallRequest,
        session: &SessionKey,
        turns: Option<Vec<ConversationTurn>>,
        decision: &GuardianDecision,
        enforced: bool,
    ) {
        let reason = decision.reason.as_deref().unwrap_or("");

        if !decision.is_block() {
            info!(
                "Guardian ALLOW {} [{}] session={} {}",
                request.tool_name,
                state,
                session.key,
                truncate_str(reason, 120)
            );
            self.decision_logger.log(DecisionEvent::new(
                "guardian_decision",
                json!({
                    "session_key": session.key,
                    "tool_name": request.tool_name,
                    "action": decision.action,
                    "reason": decision.reason,
                    "state": state.as_str(),
                }),
            ));
            return;
        }

        let turns = turns.unwrap_or_else(|| self.caches.turns().get(&session.key));
        let mode = self.config.mode;
        warn!(
            "Guardian BLOCK {} [{}] session={} mode={}: {}",
            request.tool_name, state, session.key, mode, reason
        );
        for (i, turn) in turns.iter().enumerate() {
            if let Some(assistant) = &turn.assistant {
                warn!("  {}. Assistant: {}", i + 1, truncate_str(assistant, 200));
            }
            warn!("  {}. User: {}", i + 1, truncate_str(&turn.user, 200));
        }
        warn!("  Args: {}", request.args);
        if !enforced {
            warn!("Audit mode: {} allowed to proceed", request.tool_name);
        }

        self.decision_logger.log(DecisionEvent::new(
            "guardian_block",
            json!({
                "session_key": session.key,
                "tool_name": request.tool_name,
                "args": request.args,
                "reason": decision.reason,
                "state": state.as_str(),
                "mode": mode,
                "enforced": enforced,
                "turns": turns,
            }),
        ));
    }
}
