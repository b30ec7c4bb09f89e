use serde::{Deserialize, Serialize};

/// Settings for the RPC listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// TCP port the controller connects to (valid range: 1-65535).
    pub port: u32,
    /// Largest accepted request body in bytes.
    pub max_body_bytes: u32,
    /// Deepest accepted nesting of array/struct values in a request.
    pub max_value_depth: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8082,
            max_body_bytes: 1024 * 1024,
            max_value_depth: 32,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
