//! Unit tests for the null backend

use aside_domain::KeyValueBackend;
use aside_providers::NullBackend;
use std::time::Duration;

#[tokio::test]
async fn test_null_backend_remembers_nothing() {
    let backend = NullBackend::new();

    backend
        .set("k", "v", Duration::from_secs(60))
        .await
        .unwrap();
    assert_eq!(backend.get("k").await.unwrap(), None);
    assert!(!backend.set_keep_ttl("k", "v").await.unwrap());
    assert!(!backend.delete("k").await.unwrap());
    assert_eq!(backend.delete_matching("k*").await.unwrap(), 0);
    assert_eq!(backend.provider_name(), "null");
}

#[tokio::test]
async fn test_null_backend_windows_always_start_empty() {
    let backend = NullBackend::new();
    let ttl = Duration::from_secs(60);

    for _ in 0..5 {
        let step = backend.increment_bounded("w", 3, ttl).await.unwrap();
        assert_eq!(step.count, 1);
        assert!(step.incremented);
    }
}
