//! Full configuration validation.
//!
//! Validates numeric ranges and required strings, collecting every problem
//! into a single `ConfigError`.

mod helpers;

#[cfg(test)]
mod tests;

use crate::schema::LanternConfig;
use lantern_common::ConfigError;

use helpers::{validate_non_empty, validate_range};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &LanternConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_server(&mut errors, config);
    validate_window(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_server(errors: &mut Vec<String>, config: &LanternConfig) {
    validate_non_empty(errors, "server.host", &config.server.host);
    validate_range(errors, "server.port", config.server.port, 1, 65535);
    validate_range(
        errors,
        "server.max_body_bytes",
        config.server.max_body_bytes,
        1024,
        64 * 1024 * 1024,
    );
    validate_range(
        errors,
        "server.max_value_depth",
        config.server.max_value_depth,
        1,
        256,
    );
}

fn validate_window(errors: &mut Vec<String>, config: &LanternConfig) {
    validate_range(errors, "window.width", config.window.width, 100, 16384);
    validate_range(errors, "window.height", config.window.height, 100, 16384);
    if config.window.max_windows != 0 {
        validate_range(
            errors,
            "window.max_windows",
            config.window.max_windows,
            1,
            65536,
        );
    }
}
