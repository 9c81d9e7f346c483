use std::fs;
use std::time::Duration;

use newtca::cli::Args;
use newtca::config::{Config, ConfigError};
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    (dir, path)
}

/// Test that Config::default() produces the expected values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.clock.timer_interval_ms, 1000);
    assert_eq!(config.clock.timer_interval(), Duration::from_secs(1));
    assert_eq!(config.facts.base_url, "http://numberapi.com");
    assert_eq!(config.facts.delay_ms, 3000);
    assert_eq!(config.facts.request_timeout_seconds, 10);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("newtca/config.toml"));
}

#[test]
fn test_partial_file_keeps_defaults() {
    let (_dir, path) = write_config(
        r#"
[clock]
timer_interval_ms = 250
"#,
    );
    let config = Config::load_from(&path).expect("config loads");
    assert_eq!(config.clock.timer_interval_ms, 250);
    assert_eq!(config.facts, Config::default().facts);
}

#[test]
fn test_empty_file_is_default() {
    let (_dir, path) = write_config("");
    assert_eq!(Config::load_from(&path).expect("config loads"), Config::default());
}

#[test]
fn test_full_file() {
    let (_dir, path) = write_config(
        r#"
[clock]
timer_interval_ms = 500

[facts]
base_url = "http://localhost:8080/"
delay_ms = 0
request_timeout_seconds = 2
"#,
    );
    let config = Config::load_from(&path).expect("config loads");
    assert_eq!(config.clock.timer_interval(), Duration::from_millis(500));
    assert_eq!(config.facts.base_url, "http://localhost:8080/");
    assert_eq!(config.facts.delay_ms, 0);
    assert_eq!(config.facts.request_timeout_seconds, 2);
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("absent.toml");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let (_dir, path) = write_config("[clock\ntimer_interval_ms = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_wrong_type_is_parse_error() {
    let (_dir, path) = write_config("[clock]\ntimer_interval_ms = \"fast\"\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_validation_rejects_zero_interval() {
    let (_dir, path) = write_config("[clock]\ntimer_interval_ms = 0\n");
    let err = Config::load_from(&path).unwrap_err();
    match err {
        ConfigError::ValidationError { message } => assert!(message.contains("timer_interval_ms")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_validation_rejects_blank_base_url() {
    let mut config = Config::default();
    config.facts.base_url = "   ".into();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn test_validation_rejects_zero_request_timeout() {
    let (_dir, path) = write_config("[facts]\nrequest_timeout_seconds = 0\n");
    match Config::load_from(&path).unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("request_timeout_seconds"))
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_args_override_file_values() {
    let (_dir, path) = write_config("[facts]\ndelay_ms = 100\n");
    let args = Args {
        config: Some(path),
        timer_interval_ms: Some(50),
        fact_base_url: Some("http://facts.test".into()),
        fact_delay_ms: Some(0),
        offline: false,
    };
    let config = args.load_config().expect("config loads");
    assert_eq!(config.clock.timer_interval_ms, 50);
    assert_eq!(config.facts.base_url, "http://facts.test");
    assert_eq!(config.facts.delay_ms, 0);
}

#[test]
fn test_args_overrides_are_validated() {
    let (_dir, path) = write_config("");
    let args = Args {
        config: Some(path),
        timer_interval_ms: Some(0),
        ..Args::default()
    };
    assert!(matches!(
        args.load_config(),
        Err(ConfigError::ValidationError { .. })
    ));
}
