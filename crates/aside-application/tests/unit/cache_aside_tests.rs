//! Unit tests for cache-aside execution

use crate::support::{failing_store, memory_store};
use aside_application::{CacheAside, Cached};
use aside_domain::ports::CacheEntryConfig;
use aside_domain::{CacheArgs, KeyValueBackend};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Product {
    id: u32,
    name: String,
}

fn product(id: u32) -> Product {
    Product {
        id,
        name: format!("product-{id}"),
    }
}

#[tokio::test]
async fn test_miss_computes_and_stores() {
    let (store, backend, _) = memory_store(0);
    let cache = CacheAside::new(store, Duration::from_secs(3600));
    let args = CacheArgs::new().arg(7);

    let result = cache
        .execute("products:detail", &args, || async {
            Ok::<_, Infallible>(product(7))
        })
        .await
        .unwrap();

    assert_eq!(result, Cached::Computed(product(7)));
    let stored = backend.get("products:detail:7").await.unwrap().unwrap();
    assert_eq!(
        serde_json::from_str::<Product>(&stored).unwrap(),
        product(7)
    );
    assert_eq!(
        backend.ttl("products:detail:7"),
        Some(Some(Duration::from_secs(3600)))
    );
}

#[tokio::test]
async fn test_hit_skips_compute() {
    let (store, _, _) = memory_store(0);
    let cache = CacheAside::new(store, Duration::from_secs(60));
    let args = CacheArgs::new().arg(1);
    let calls = AtomicUsize::new(0);

    for _ in 0..3 {
        cache
            .execute("products:detail", &args, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Infallible>(product(1))
            })
            .await
            .unwrap();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let hit = cache
        .execute("products:detail", &args, || async {
            Ok::<_, Infallible>(product(999))
        })
        .await
        .unwrap();
    assert!(hit.is_hit());
    assert_eq!(hit.into_value(), Some(product(1)));
}

#[tokio::test]
async fn test_undecodable_payload_returned_raw() {
    let (store, backend, _) = memory_store(0);
    backend
        .set("greeting", "not json", Duration::from_secs(60))
        .await
        .unwrap();
    let cache = CacheAside::new(store, Duration::from_secs(60));

    let result = cache
        .execute::<Product, Infallible, _, _>("greeting", &CacheArgs::new(), || async {
            Ok(product(1))
        })
        .await
        .unwrap();

    assert_eq!(result, Cached::Raw("not json".to_string()));
    assert_eq!(result.into_value(), None);
}

#[tokio::test]
async fn test_unserializable_value_cached_as_debug_form() {
    let (store, backend, _) = memory_store(0);
    let cache = CacheAside::new(store, Duration::from_secs(60));
    let args = CacheArgs::new().arg("grid");
    // JSON object keys must be strings
    let compute = || async { Ok::<_, Infallible>(HashMap::from([((1_u8, 2_u8), 3_u8)])) };

    let first = cache.execute("cells", &args, compute).await.unwrap();
    assert_eq!(first, Cached::Computed(HashMap::from([((1, 2), 3)])));
    assert_eq!(
        backend.get("cells:grid").await.unwrap().as_deref(),
        Some("{(1, 2): 3}")
    );

    let second = cache.execute("cells", &args, compute).await.unwrap();
    assert_eq!(second, Cached::Raw("{(1, 2): 3}".to_string()));
}

#[tokio::test]
async fn test_execute_json_wraps_raw_payload() {
    let (store, backend, _) = memory_store(0);
    backend
        .set("legacy", "plain text", Duration::from_secs(60))
        .await
        .unwrap();
    let cache = CacheAside::new(store, Duration::from_secs(60));

    let value = cache
        .execute_json("legacy", &CacheArgs::new(), || async {
            Ok::<_, Infallible>(serde_json::json!({"unused": true}))
        })
        .await
        .unwrap();

    assert_eq!(value, serde_json::Value::String("plain text".to_string()));
}

#[tokio::test]
async fn test_compute_error_is_propagated_and_not_cached() {
    let (store, backend, _) = memory_store(0);
    let cache = CacheAside::new(store, Duration::from_secs(60));
    let args = CacheArgs::new().arg(3);

    let result = cache
        .execute::<Product, _, _, _>("products:detail", &args, || async {
            Err("database down")
        })
        .await;

    assert_eq!(result.unwrap_err(), "database down");
    assert!(backend.is_empty());
}

#[tokio::test]
async fn test_ttl_override() {
    let (store, backend, _) = memory_store(0);
    let cache = CacheAside::new(store, Duration::from_secs(3600));

    cache
        .execute_with(
            "short",
            &CacheArgs::new(),
            CacheEntryConfig::new().with_ttl_secs(5),
            || async { Ok::<_, Infallible>(1_u32) },
        )
        .await
        .unwrap();

    assert_eq!(backend.ttl("short"), Some(Some(Duration::from_secs(5))));
}

#[tokio::test]
async fn test_entry_expires_then_recomputes() {
    let (store, _, clock) = memory_store(0);
    let cache = CacheAside::new(store, Duration::from_secs(10));
    let args = CacheArgs::new();
    let calls = AtomicUsize::new(0);
    let compute = || async {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok::<_, Infallible>(42_u32)
    };

    cache.execute("answer", &args, compute).await.unwrap();
    clock.advance(Duration::from_secs(10));
    let again = cache.execute("answer", &args, compute).await.unwrap();

    assert_eq!(again, Cached::Computed(42));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_backend_failure_falls_through_to_compute() {
    let (store, backend) = failing_store();
    let cache = CacheAside::new(store, Duration::from_secs(60));

    let result = cache
        .execute("products:list", &CacheArgs::new(), || async {
            Ok::<_, Infallible>(vec![product(1), product(2)])
        })
        .await
        .unwrap();

    assert_eq!(result.into_value().map(|v| v.len()), Some(2));
    // One failed read, one failed write
    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_operation_fixes_prefix_and_ttl() {
    let (store, backend, _) = memory_store(0);
    let cache = CacheAside::new(store, Duration::from_secs(3600));
    let detail = cache.operation("products:detail").with_ttl_secs(300);

    assert_eq!(detail.prefix(), "products:detail");
    detail
        .run(&CacheArgs::new().arg(8).kwarg("lang", "en"), || async {
            Ok::<_, Infallible>(product(8))
        })
        .await
        .unwrap();

    assert_eq!(
        backend.ttl("products:detail:8:lang=en"),
        Some(Some(Duration::from_secs(300)))
    );
}
