//! Rate Gatekeeper Use Case
//!
//! Per request: skip (excluded path, bypass credential, limiter disabled) or
//! count against the `(origin, path)` window and admit or reject. Either way
//! the decision is terminal; nothing is retried.

use crate::store::KeyValueStore;
use crate::use_cases::window_counter::{CounterMode, WindowCounter};
use aside_domain::constants::{DEFAULT_RATE_LIMIT_MAX_REQUESTS, DEFAULT_RATE_LIMIT_WINDOW_SECS};
use aside_domain::ports::Clock;
use aside_domain::{GateRequest, RateDecision, RateRejection};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info};

/// Admission rules for the gatekeeper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitPolicy {
    /// When false every request is admitted without evaluation
    pub enabled: bool,
    /// Maximum requests per identifier per window
    pub max_requests: u64,
    /// Window length in seconds
    pub window_secs: u64,
    /// Credential that skips evaluation when presented
    pub bypass_token: Option<String>,
    /// Paths starting with any of these are never limited
    pub excluded_path_prefixes: Vec<String>,
    /// Counter increment strategy
    pub counter_mode: CounterMode,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
            bypass_token: None,
            excluded_path_prefixes: Vec::new(),
            counter_mode: CounterMode::default(),
        }
    }
}

/// What happened to one request
#[derive(Debug, Clone, PartialEq)]
pub enum Admission<R> {
    /// Not evaluated; the handler ran and no metadata applies
    Bypassed(R),
    /// Counted and admitted; the handler ran
    Admitted {
        /// Handler response
        response: R,
        /// Metadata to attach to the response
        decision: RateDecision,
    },
    /// Counted and rejected; the handler did not run
    Rejected(RateRejection),
}

impl<R> Admission<R> {
    /// Rate metadata, when the request was evaluated
    pub fn decision(&self) -> Option<RateDecision> {
        match self {
            Self::Bypassed(_) => None,
            Self::Admitted { decision, .. } => Some(*decision),
            Self::Rejected(rejection) => Some(rejection.decision()),
        }
    }

    /// True when the handler was short-circuited
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Handler response, if the handler ran
    pub fn into_response(self) -> Option<R> {
        match self {
            Self::Bypassed(response) | Self::Admitted { response, .. } => Some(response),
            Self::Rejected(_) => None,
        }
    }
}

/// Admission control in front of request handlers
#[derive(Debug, Clone)]
pub struct RateGatekeeper {
    counter: WindowCounter,
    policy: RateLimitPolicy,
}

impl RateGatekeeper {
    /// Build the gatekeeper and its window counter
    pub fn new(store: KeyValueStore, clock: Arc<dyn Clock>, policy: RateLimitPolicy) -> Self {
        let counter =
            WindowCounter::new(store, clock, policy.max_requests).with_mode(policy.counter_mode);
        Self { counter, policy }
    }

    /// Active policy
    pub fn policy(&self) -> &RateLimitPolicy {
        &self.policy
    }

    /// Whether `request` is subject to counting
    pub fn should_limit(&self, request: &GateRequest<'_>) -> bool {
        if !self.policy.enabled {
            return false;
        }

        if self
            .policy
            .excluded_path_prefixes
            .iter()
            .any(|prefix| request.path.starts_with(prefix.as_str()))
        {
            return false;
        }

        !matches!(
            (request.bypass_token, self.policy.bypass_token.as_deref()),
            (Some(provided), Some(expected)) if !provided.is_empty() && provided == expected
        )
    }

    /// Count `request` and decide; `None` when it is not subject to counting
    pub async fn evaluate(&self, request: &GateRequest<'_>) -> Option<RateDecision> {
        if !self.should_limit(request) {
            debug!(path = request.path, "Rate limiting skipped");
            return None;
        }

        let identifier = request.identifier();
        let window = self
            .counter
            .increment(&identifier, self.policy.window_secs)
            .await;

        let decision = if window.incremented {
            RateDecision::admit(self.policy.max_requests, window.count, window.reset_seconds)
        } else {
            info!(
                identifier = %identifier,
                count = window.count,
                reset_seconds = window.reset_seconds,
                "Rate limit exceeded"
            );
            RateDecision::reject(self.policy.max_requests, window.reset_seconds)
        };
        Some(decision)
    }

    /// Evaluate `request` and run `next` only if it is admitted or skipped
    pub async fn handle<R, F, Fut>(&self, request: &GateRequest<'_>, next: F) -> Admission<R>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = R>,
    {
        match self.evaluate(request).await {
            None => Admission::Bypassed(next().await),
            Some(decision) if decision.allowed => Admission::Admitted {
                response: next().await,
                decision,
            },
            Some(decision) => Admission::Rejected(RateRejection::from_decision(&decision)),
        }
    }
}
