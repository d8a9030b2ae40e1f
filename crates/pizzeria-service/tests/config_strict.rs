#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pizzeria_service::config::{self, Environment};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
metrics:
  source: "jwt-pizza-service"
  url: "https://metrics.example/push"
  userId: "42"
  apiKey: "secret"
  apikey: "typo should fail"
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.environment, Environment::Development);
    assert_eq!(cfg.server.listen, "0.0.0.0:3000");
    assert!(cfg.metrics.is_none());
}

#[test]
fn full_metrics_section() {
    let ok = r#"
version: 1
environment: production
server:
  listen: "127.0.0.1:8080"
metrics:
  source: "jwt-pizza-service-dev"
  url: "https://influx.example/api/v1/push/influx/write"
  userId: "1234"
  apiKey: "glc_abc"
  reportIntervalMs: 5000
  latencyWindow: 100
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert!(cfg.environment.is_production());
    let m = cfg.metrics.expect("metrics section");
    assert_eq!(m.source, "jwt-pizza-service-dev");
    assert_eq!(m.user_id, "1234");
    assert_eq!(m.api_key, "glc_abc");
    assert_eq!(m.report_interval_ms, 5000);
    assert_eq!(m.latency_window, Some(100));
}

#[test]
fn report_interval_defaults_to_ten_seconds() {
    let ok = r#"
version: 1
metrics:
  source: "s"
  url: "http://localhost:9999/push"
  userId: "1"
  apiKey: "k"
"#;
    let cfg = config::load_from_str(ok).unwrap();
    assert_eq!(cfg.metrics.unwrap().report_interval_ms, 10_000);
}

#[test]
fn rejects_bad_values() {
    let bad_version = "version: 2\n";
    assert_eq!(
        config::load_from_str(bad_version).unwrap_err().code(),
        "UNSUPPORTED_VERSION"
    );

    let bad_url = r#"
version: 1
metrics: { source: "s", url: "ftp://x", userId: "1", apiKey: "k" }
"#;
    assert_eq!(config::load_from_str(bad_url).unwrap_err().code(), "BAD_CONFIG");

    let bad_interval = r#"
version: 1
metrics: { source: "s", url: "http://x", userId: "1", apiKey: "k", reportIntervalMs: 10 }
"#;
    assert_eq!(config::load_from_str(bad_interval).unwrap_err().code(), "BAD_CONFIG");

    let bad_listen = "version: 1\nserver: { listen: \"nope\" }\n";
    assert_eq!(config::load_from_str(bad_listen).unwrap_err().code(), "BAD_CONFIG");

    let bad_env = "version: 1\nenvironment: staging\n";
    assert_eq!(config::load_from_str(bad_env).unwrap_err().code(), "BAD_CONFIG");
}

#[test]
fn environment_override_spellings() {
    assert_eq!(Environment::parse("prod").unwrap(), Environment::Production);
    assert_eq!(Environment::parse("Production").unwrap(), Environment::Production);
    assert_eq!(Environment::parse("dev").unwrap(), Environment::Development);
    assert!(Environment::parse("qa").is_err());
}

#[test]
fn yaml_accepts_short_environment_names() {
    let prod = config::load_from_str("version: 1\nenvironment: prod\n").unwrap();
    assert_eq!(prod.environment, Environment::Production);
    let dev = config::load_from_str("version: 1\nenvironment: dev\n").unwrap();
    assert_eq!(dev.environment, Environment::Development);
}
