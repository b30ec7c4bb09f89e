//! System configuration types: logging.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `tracing` filter directive for the lantern crates at this level.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "lantern=debug",
            LogLevel::Info => "lantern=info",
            LogLevel::Warning => "lantern=warn",
            LogLevel::Error => "lantern=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_parses_uppercase() {
        let config: LoggingConfig = toml::from_str("level = \"DEBUG\"").unwrap();
        assert_eq!(config.level, LogLevel::Debug);
    }

    #[test]
    fn log_level_directives() {
        assert_eq!(LogLevel::Info.directive(), "lantern=info");
        assert_eq!(LogLevel::Warning.directive(), "lantern=warn");
    }
}
