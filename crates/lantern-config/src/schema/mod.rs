//! Configuration schema types for Lantern.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod server;
mod system;
mod window;

pub use server::*;
pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Lantern.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct LanternConfig {
    pub server: ServerConfig,
    pub window: WindowConfig,
    pub logging: LoggingConfig,
}
