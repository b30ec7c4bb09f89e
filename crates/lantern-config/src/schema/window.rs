use serde::{Deserialize, Serialize};

/// Template applied to every window the renderer creates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Initial URL loaded into the window's browser view.
    pub url: String,
    /// Maximum number of live windows; `0` means unlimited.
    pub max_windows: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Lantern".into(),
            width: 800,
            height: 600,
            url: "about:blank".into(),
            max_windows: 0,
        }
    }
}
