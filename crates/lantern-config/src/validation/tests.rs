//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    let config = LanternConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_port_zero() {
    let mut config = LanternConfig::default();
    config.server.port = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("server.port"));
}

#[test]
fn catches_port_too_large() {
    let mut config = LanternConfig::default();
    config.server.port = 70000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("server.port"));
}

#[test]
fn catches_empty_host() {
    let mut config = LanternConfig::default();
    config.server.host = "  ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("server.host"));
}

#[test]
fn catches_tiny_body_limit() {
    let mut config = LanternConfig::default();
    config.server.max_body_bytes = 10;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("server.max_body_bytes"));
}

#[test]
fn catches_zero_value_depth() {
    let mut config = LanternConfig::default();
    config.server.max_value_depth = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("server.max_value_depth"));
}

#[test]
fn unlimited_windows_is_valid() {
    let mut config = LanternConfig::default();
    config.window.max_windows = 0;
    assert!(validate(&config).is_ok());
    config.window.max_windows = 4;
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_window_limit_too_large() {
    let mut config = LanternConfig::default();
    config.window.max_windows = 100_000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.max_windows"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = LanternConfig::default();
    config.window.width = 1;
    config.window.height = 1;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.width"));
    assert!(err.contains("window.height"));
    assert!(err.contains("; "));
}
