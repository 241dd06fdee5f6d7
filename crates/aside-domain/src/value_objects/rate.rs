//! Rate-limit decisions and the rejection payload

use crate::constants::{
    HEADER_RATE_LIMIT_LIMIT, HEADER_RATE_LIMIT_REMAINING, HEADER_RATE_LIMIT_RESET,
    RATE_LIMIT_EXCEEDED_DETAIL, RATE_LIMIT_STATUS_CODE,
};
use serde::{Deserialize, Serialize};

/// Outcome of evaluating one request against its window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Requests left in the current window
    pub remaining: u64,
    /// Maximum requests per window
    pub limit: u64,
    /// Seconds until the current window closes
    pub reset_seconds: u64,
}

impl RateDecision {
    /// Admit with the quota left after this request
    pub fn admit(limit: u64, count: u64, reset_seconds: u64) -> Self {
        Self {
            allowed: true,
            remaining: limit.saturating_sub(count),
            limit,
            reset_seconds,
        }
    }

    /// Reject; nothing remains in the window
    pub fn reject(limit: u64, reset_seconds: u64) -> Self {
        Self {
            allowed: false,
            remaining: 0,
            limit,
            reset_seconds,
        }
    }

    /// Response metadata as `(header, value)` pairs
    pub fn headers(&self) -> [(&'static str, String); 3] {
        [
            (HEADER_RATE_LIMIT_LIMIT, self.limit.to_string()),
            (HEADER_RATE_LIMIT_REMAINING, self.remaining.to_string()),
            (HEADER_RATE_LIMIT_RESET, self.reset_seconds.to_string()),
        ]
    }
}

/// Body returned to a rejected client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRejection {
    /// Fixed human-readable reason
    pub detail: String,
    /// Maximum requests per window
    pub limit: u64,
    /// Always zero for a rejection
    pub remaining: u64,
    /// Seconds until the window resets
    pub reset_in: u64,
}

impl RateRejection {
    /// Build the payload from a rejecting decision
    pub fn from_decision(decision: &RateDecision) -> Self {
        Self {
            detail: RATE_LIMIT_EXCEEDED_DETAIL.to_string(),
            limit: decision.limit,
            remaining: decision.remaining,
            reset_in: decision.reset_seconds,
        }
    }

    /// HTTP status to report alongside the payload
    pub fn status_code(&self) -> u16 {
        RATE_LIMIT_STATUS_CODE
    }

    /// The decision this payload was rendered from
    pub fn decision(&self) -> RateDecision {
        RateDecision {
            allowed: false,
            remaining: self.remaining,
            limit: self.limit,
            reset_seconds: self.reset_in,
        }
    }
}
