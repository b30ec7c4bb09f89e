//! Lantern configuration system.
//!
//! TOML-based configuration with full validation. All config sections use
//! sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lantern_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{LanternConfig, LogLevel, LoggingConfig, ServerConfig, WindowConfig};
pub use schema::CONFIG_SCHEMA_VERSION;

use std::path::Path;

use lantern_common::ConfigError;

/// Load config from an explicit path, or from the platform default path.
///
/// The default path gets a commented template written to it when missing.
/// The result is validated either way.
pub fn load_config(path: Option<&Path>) -> Result<LanternConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &LanternConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
