//! Configuration loading tests

use aside_application::CounterMode;
use aside_infrastructure::config::{AppConfig, ConfigLoader, StoreProvider};
use figment::Jail;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".toml").unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();

    assert_eq!(config.store.provider, StoreProvider::Redis);
    assert_eq!(config.store.url, "redis://localhost:6379/0");
    assert_eq!(config.store.pool_size, 50);
    assert_eq!(config.store.operation_timeout_ms, 2000);
    assert_eq!(config.store.default_ttl_secs, 3600);
    assert!(config.rate_limit.enabled);
    assert_eq!(config.rate_limit.max_requests, 100);
    assert_eq!(config.rate_limit.window_secs, 60);
    assert_eq!(config.rate_limit.bypass_token, None);
    assert!(config.rate_limit.excluded_path_prefixes.is_empty());
    assert!(!config.rate_limit.atomic_increment);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_load_from_file() {
    let file = write_config(
        r#"
[store]
provider = "memory"
default_ttl_secs = 120

[rate_limit]
max_requests = 3
window_secs = 10
bypass_token = "s3cret"
excluded_path_prefixes = ["/health", "/docs"]
atomic_increment = true
"#,
    );

    let config = ConfigLoader::new()
        .with_config_path(file.path())
        .load()
        .unwrap();

    assert_eq!(config.store.provider, StoreProvider::Memory);
    assert_eq!(config.store.default_ttl_secs, 120);
    // Unspecified keys keep their defaults
    assert_eq!(config.store.pool_size, 50);

    let policy = config.rate_limit.policy();
    assert_eq!(policy.max_requests, 3);
    assert_eq!(policy.window_secs, 10);
    assert_eq!(policy.bypass_token.as_deref(), Some("s3cret"));
    assert_eq!(policy.excluded_path_prefixes, vec!["/health", "/docs"]);
    assert_eq!(policy.counter_mode, CounterMode::Atomic);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let config = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .load()
        .unwrap();

    assert_eq!(config, AppConfig::default());
}

// Jailed tests use their own env prefix so the variables they set never
// leak into loaders running concurrently with the default prefix.
#[test]
fn test_environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "aside.toml",
            r#"
[store]
provider = "null"
pool_size = 5
"#,
        )?;
        jail.set_env("JAILED__STORE__POOL_SIZE", 7);
        jail.set_env("JAILED__RATE_LIMIT__MAX_REQUESTS", 9);
        jail.set_env("JAILED__LOGGING__LEVEL", "debug");

        // aside.toml is discovered in the working directory
        let config = ConfigLoader::new()
            .with_env_prefix("JAILED")
            .load()
            .map_err(|e| e.to_string())?;

        assert_eq!(config.store.provider, StoreProvider::Null);
        assert_eq!(config.store.pool_size, 7);
        assert_eq!(config.rate_limit.max_requests, 9);
        assert_eq!(config.logging.level, "debug");
        Ok(())
    });
}

#[test]
fn test_invalid_environment_value_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("JAILED__RATE_LIMIT__WINDOW_SECS", 0);

        let result = ConfigLoader::new().with_env_prefix("JAILED").load();

        assert!(result.is_err());
        Ok(())
    });
}

#[test]
fn test_validation_rejects_zero_values() {
    for (section, key) in [
        ("store", "pool_size"),
        ("store", "default_ttl_secs"),
        ("store", "operation_timeout_ms"),
        ("rate_limit", "max_requests"),
        ("rate_limit", "window_secs"),
    ] {
        let file = write_config(&format!("[{section}]\n{key} = 0\n"));

        let result = ConfigLoader::new().with_config_path(file.path()).load();

        assert!(result.is_err(), "{section}.{key} = 0 should be rejected");
    }
}

#[test]
fn test_validation_requires_redis_url() {
    let file = write_config("[store]\nprovider = \"redis\"\nurl = \"\"\n");

    let err = ConfigLoader::new()
        .with_config_path(file.path())
        .load()
        .unwrap_err();

    assert!(err.to_string().contains("URL"));
}

#[test]
fn test_memory_provider_needs_no_url() {
    let file = write_config("[store]\nprovider = \"memory\"\nurl = \"\"\n");

    assert!(ConfigLoader::new().with_config_path(file.path()).load().is_ok());
}

#[test]
fn test_validation_rejects_bad_log_level() {
    let file = write_config("[logging]\nlevel = \"loud\"\n");

    assert!(ConfigLoader::new().with_config_path(file.path()).load().is_err());
}

#[test]
fn test_unknown_provider_is_rejected() {
    let file = write_config("[store]\nprovider = \"memcached\"\n");

    assert!(ConfigLoader::new().with_config_path(file.path()).load().is_err());
}

#[test]
fn test_saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aside.toml");
    let mut config = AppConfig::default();
    config.store.provider = StoreProvider::Memory;
    config.rate_limit.bypass_token = Some("token".to_string());
    config.rate_limit.excluded_path_prefixes = vec!["/health".to_string()];

    let loader = ConfigLoader::new().with_config_path(&path);
    loader.save_to_file(&config, &path).unwrap();

    assert_eq!(loader.config_path(), Some(path.as_path()));
    assert_eq!(loader.load().unwrap(), config);
}

#[test]
fn test_empty_bypass_token_disables_bypass() {
    let mut config = AppConfig::default();
    config.rate_limit.bypass_token = Some(String::new());

    assert_eq!(config.rate_limit.policy().bypass_token, None);
}
