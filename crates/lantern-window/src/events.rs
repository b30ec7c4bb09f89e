//! Window lifecycle events.

/// Emitted by a backend as windows come and go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    Created { window_id: u64 },
    Destroyed { window_id: u64 },
}
