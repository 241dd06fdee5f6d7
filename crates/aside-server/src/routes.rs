//! Smoke routes
//!
//! `/health` is never counted; `/status` sits behind [`RateLimited`].

use crate::rate_limit::RateLimited;
use aside_infrastructure::AppContext;
use rocket::serde::json::Json;
use rocket::{State, get, routes};
use serde::Serialize;

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok` when the server answers
    pub status: &'static str,
    /// Configured store backend
    pub store: String,
}

/// Rate limit view of the current request
#[derive(Debug, Serialize)]
pub struct RateLimitStatus {
    /// Whether admission control is on
    pub enabled: bool,
    /// Requests per window
    pub limit: u64,
    /// Window length in seconds
    pub window_secs: u64,
    /// Requests left in the current window; absent when not counted
    pub remaining: Option<u64>,
}

/// Status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Always `ok` when admitted
    pub status: &'static str,
    /// Configured store backend
    pub store: String,
    /// Rate limit state
    pub rate_limit: RateLimitStatus,
}

/// Liveness probe
#[get("/health")]
pub fn health(context: &State<AppContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        store: context.store().provider_name().to_string(),
    })
}

/// Rate-limited status endpoint
#[get("/status")]
pub fn status(limit: RateLimited, context: &State<AppContext>) -> Json<StatusResponse> {
    let rate_limit = &context.config().rate_limit;
    Json(StatusResponse {
        status: "ok",
        store: context.store().provider_name().to_string(),
        rate_limit: RateLimitStatus {
            enabled: rate_limit.enabled,
            limit: rate_limit.max_requests,
            window_secs: rate_limit.window_secs,
            remaining: limit.decision().map(|decision| decision.remaining),
        },
    })
}

/// All smoke routes
pub fn all() -> Vec<rocket::Route> {
    routes![health, status]
}
