//! Application context tests

use aside_domain::{CacheArgs, GateRequest};
use aside_infrastructure::config::{AppConfig, StoreProvider};
use aside_infrastructure::di::{create_backend, init_app, init_app_with_clock};
use aside_providers::{ManualClock, SystemClock};
use std::convert::Infallible;
use std::sync::Arc;

fn memory_config(max_requests: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.store.provider = StoreProvider::Memory;
    config.rate_limit.max_requests = max_requests;
    config
}

#[test]
fn test_factory_selects_provider() {
    let mut config = AppConfig::default();
    for (provider, name) in [
        (StoreProvider::Redis, "redis"),
        (StoreProvider::Memory, "memory"),
        (StoreProvider::Null, "null"),
    ] {
        config.store.provider = provider;
        let backend = create_backend(&config.store, Arc::new(SystemClock)).unwrap();
        assert_eq!(backend.provider_name(), name);
    }
}

#[test]
fn test_redis_context_builds_without_server() {
    let mut config = AppConfig::default();
    config.store.url = "redis://127.0.0.1:1/0".to_string();

    let context = init_app(config).unwrap();

    assert_eq!(context.store().provider_name(), "redis");
}

#[tokio::test]
async fn test_services_share_one_store() {
    let context = init_app(memory_config(100)).unwrap();
    let args = CacheArgs::new().arg(1);

    context
        .cache()
        .execute("products:detail", &args, || async {
            Ok::<_, Infallible>("widget".to_string())
        })
        .await
        .unwrap();
    assert!(context.store().get("products:detail:1").await.is_some());

    assert!(context.invalidation().invalidate_prefix("products:detail").await);
    assert!(context.store().get("products:detail:1").await.is_none());
}

#[tokio::test]
async fn test_gatekeeper_uses_configured_policy() {
    let clock = ManualClock::at_secs(125);
    let context = init_app_with_clock(memory_config(2), Arc::new(clock)).unwrap();
    let gatekeeper = context.gatekeeper();
    let request = GateRequest::new("/status").with_forwarded_for("10.0.0.1");

    assert_eq!(gatekeeper.policy().max_requests, 2);
    assert!(gatekeeper.evaluate(&request).await.unwrap().allowed);
    assert!(gatekeeper.evaluate(&request).await.unwrap().allowed);
    let rejected = gatekeeper.evaluate(&request).await.unwrap();
    assert!(!rejected.allowed);
    assert_eq!(rejected.reset_seconds, 55);
    assert_eq!(context.config().rate_limit.max_requests, 2);
}
