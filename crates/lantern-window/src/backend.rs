/// Why a window could not be constructed.
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("window limit reached ({limit} live)")]
    Exhausted { limit: usize },

    #[error("backend error: {0}")]
    Backend(String),
}

/// Toolkit layer that owns the actual displayable objects.
///
/// `destroy_window` is called at most once per window created; callers
/// guarantee that, implementations need not be idempotent.
pub trait WindowBackend: Send + Sync + 'static {
    type Window: Send + Sync + 'static;

    fn create_window(&self) -> Result<Self::Window, WindowError>;

    fn destroy_window(&self, window: &Self::Window);
}
