//! Rate limiting for Rocket
//!
//! Admission control is split across three Rocket hooks:
//!
//! - [`RateLimited`] request guard: evaluates the request once and fails with
//!   429 before the handler runs when the window is full
//! - [`RateLimitHeaders`] fairing: copies the decision into
//!   `X-RateLimit-Limit`, `X-RateLimit-Remaining` and `X-RateLimit-Reset`
//! - [`too_many_requests`] catcher: renders the rejection body
//!
//! The decision is stored in request-local state, so the guard may appear on
//! any number of routes without counting a request twice.
//!
//! Only requests routed to a handler that takes [`RateLimited`] are counted.
//! Unguarded routes and unmatched paths (404) never reach the gatekeeper, so
//! `excluded_path_prefixes` only narrows the set of guarded routes. Put the
//! guard on every route that should share the quota.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[get("/items")]
//! fn items(_limit: RateLimited) -> &'static str {
//!     "items"
//! }
//!
//! let rocket = with_rate_limiting(rocket::build().mount("/", routes![items]), gatekeeper);
//! ```

use aside_application::RateGatekeeper;
use aside_domain::constants::{HEADER_FORWARDED_FOR, HEADER_RATE_LIMIT_BYPASS};
use aside_domain::{GateRequest, RateDecision, RateRejection};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::request::{self, FromRequest, Request};
use rocket::serde::json::Json;
use rocket::{Build, Response, Rocket, catch, catchers};
use std::sync::Arc;

/// Gatekeeper decision for the current request
///
/// `None` when the request was not counted (excluded, bypassed, disabled or
/// not yet evaluated).
#[derive(Debug, Clone, Copy, Default)]
struct Evaluation(Option<RateDecision>);

/// Request guard admitting requests within their window
pub struct RateLimited {
    decision: Option<RateDecision>,
}

impl RateLimited {
    /// Decision for this request, if it was counted
    pub fn decision(&self) -> Option<RateDecision> {
        self.decision
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for RateLimited {
    type Error = RateRejection;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        // No managed gatekeeper means rate limiting is not installed
        let Some(gatekeeper) = request.rocket().state::<Arc<RateGatekeeper>>() else {
            return Outcome::Success(Self { decision: None });
        };

        let evaluation = request
            .local_cache_async(async { Evaluation(evaluate(gatekeeper, request).await) })
            .await;

        match evaluation.0 {
            Some(decision) if !decision.allowed => Outcome::Error((
                Status::TooManyRequests,
                RateRejection::from_decision(&decision),
            )),
            decision => Outcome::Success(Self { decision }),
        }
    }
}

async fn evaluate(gatekeeper: &RateGatekeeper, request: &Request<'_>) -> Option<RateDecision> {
    let headers = request.headers();
    let mut gate = GateRequest::new(request.uri().path().as_str());
    if let Some(forwarded) = headers.get_one(HEADER_FORWARDED_FOR) {
        gate = gate.with_forwarded_for(forwarded);
    }
    if let Some(peer) = request.remote() {
        gate = gate.with_peer(peer.ip());
    }
    if let Some(token) = headers.get_one(HEADER_RATE_LIMIT_BYPASS) {
        gate = gate.with_bypass_token(token);
    }

    gatekeeper.evaluate(&gate).await
}

/// Fairing attaching rate-limit headers to evaluated responses
pub struct RateLimitHeaders;

#[rocket::async_trait]
impl Fairing for RateLimitHeaders {
    fn info(&self) -> Info {
        Info {
            name: "Rate limit headers",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let Evaluation(Some(decision)) = *request.local_cache(Evaluation::default) else {
            return;
        };
        for (name, value) in decision.headers() {
            response.set_raw_header(name, value);
        }
    }
}

/// Body for requests rejected by [`RateLimited`]
#[catch(429)]
pub fn too_many_requests(request: &Request<'_>) -> (Status, Json<RateRejection>) {
    let decision = request.local_cache(Evaluation::default).0.unwrap_or_else(|| {
        let limit = request
            .rocket()
            .state::<Arc<RateGatekeeper>>()
            .map_or(0, |gatekeeper| gatekeeper.policy().max_requests);
        RateDecision::reject(limit, 0)
    });

    (
        Status::TooManyRequests,
        Json(RateRejection::from_decision(&decision)),
    )
}

/// Install the gatekeeper, the header fairing and the 429 catcher
pub fn with_rate_limiting(rocket: Rocket<Build>, gatekeeper: Arc<RateGatekeeper>) -> Rocket<Build> {
    rocket
        .manage(gatekeeper)
        .attach(RateLimitHeaders)
        .register("/", catchers![too_many_requests])
}
