//! Unit tests for the fail-open store

use crate::support::{failing_store, memory_store};
use std::time::Duration;

#[tokio::test]
async fn test_store_round_trip() {
    let (store, _, _) = memory_store(0);

    assert!(store.set("k", "v", Duration::from_secs(5)).await);
    assert_eq!(store.get("k").await.as_deref(), Some("v"));
    assert!(store.delete("k").await);
    assert_eq!(store.get("k").await, None);
    assert_eq!(store.provider_name(), "memory");
}

#[tokio::test]
async fn test_store_refuses_zero_ttl() {
    let (store, backend, _) = memory_store(0);

    assert!(!store.set("k", "v", Duration::ZERO).await);
    assert!(backend.is_empty());
}

#[tokio::test]
async fn test_delete_of_absent_key_succeeds() {
    let (store, _, _) = memory_store(0);

    assert!(store.delete("never-written").await);
}

#[tokio::test]
async fn test_failures_degrade_silently() {
    let (store, backend) = failing_store();

    assert_eq!(store.get("k").await, None);
    assert!(!store.set("k", "v", Duration::from_secs(1)).await);
    assert!(!store.set_keep_ttl("k", "v").await);
    assert!(!store.delete("k").await);
    assert!(!store.delete_matching("k*").await);
    assert_eq!(
        store.increment_bounded("k", 1, Duration::from_secs(1)).await,
        None
    );
    assert_eq!(
        backend.calls.load(std::sync::atomic::Ordering::SeqCst),
        6
    );
}
