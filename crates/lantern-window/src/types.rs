/// Appearance applied to every new window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowTemplate {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Page loaded into the window's browser view on creation.
    pub url: String,
}

impl Default for WindowTemplate {
    fn default() -> Self {
        Self {
            title: "Lantern".to_string(),
            width: 800,
            height: 600,
            url: "about:blank".to_string(),
        }
    }
}

impl WindowTemplate {
    /// Template that loads `url`, other fields default.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}
