//! Unit tests for rate decisions and rejection payloads

use aside_domain::{RateDecision, RateRejection};

#[test]
fn test_admit_computes_remaining() {
    let decision = RateDecision::admit(3, 1, 55);
    assert!(decision.allowed);
    assert_eq!(decision.remaining, 2);
    assert_eq!(decision.limit, 3);
    assert_eq!(decision.reset_seconds, 55);
}

#[test]
fn test_admit_never_goes_negative() {
    let decision = RateDecision::admit(3, 5, 10);
    assert_eq!(decision.remaining, 0);
}

#[test]
fn test_reject_has_no_remaining() {
    let decision = RateDecision::reject(3, 12);
    assert!(!decision.allowed);
    assert_eq!(decision.remaining, 0);
}

#[test]
fn test_headers() {
    let headers = RateDecision::admit(100, 40, 17).headers();
    assert_eq!(headers[0], ("X-RateLimit-Limit", "100".to_string()));
    assert_eq!(headers[1], ("X-RateLimit-Remaining", "60".to_string()));
    assert_eq!(headers[2], ("X-RateLimit-Reset", "17".to_string()));
}

#[test]
fn test_rejection_payload() {
    let rejection = RateRejection::from_decision(&RateDecision::reject(3, 42));
    assert_eq!(rejection.status_code(), 429);

    let body = serde_json::to_value(&rejection).unwrap();
    assert_eq!(body["detail"], "Rate limit exceeded");
    assert_eq!(body["limit"], 3);
    assert_eq!(body["remaining"], 0);
    assert_eq!(body["reset_in"], 42);

    assert_eq!(rejection.decision(), RateDecision::reject(3, 42));
}
