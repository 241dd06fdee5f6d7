//! Unit tests for gate request attributes

use aside_domain::GateRequest;
use std::net::{IpAddr, Ipv4Addr};

const PEER: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5));

#[test]
fn test_forwarded_for_preferred() {
    let request = GateRequest::new("/api/v1/products")
        .with_forwarded_for("203.0.113.9")
        .with_peer(PEER);
    assert_eq!(request.identifier(), "203.0.113.9:/api/v1/products");
}

#[test]
fn test_peer_fallback() {
    let request = GateRequest::new("/orders").with_peer(PEER);
    assert_eq!(request.identifier(), "10.0.0.5:/orders");
}

#[test]
fn test_blank_forwarded_for_falls_back() {
    let request = GateRequest::new("/orders")
        .with_forwarded_for("   ")
        .with_peer(PEER);
    assert_eq!(request.client_origin(), "10.0.0.5");
}

#[test]
fn test_unknown_origin() {
    assert_eq!(GateRequest::new("/x").identifier(), "unknown:/x");
}

#[test]
fn test_paths_are_distinct_identifiers() {
    let a = GateRequest::new("/a").with_peer(PEER);
    let b = GateRequest::new("/b").with_peer(PEER);
    assert_ne!(a.identifier(), b.identifier());
}
