//! Renderer-side window collaborator.
//!
//! The RPC layer only ever asks for two things: build a displayable window,
//! and tear one down. [`WindowBackend`] is that seam. The crate ships a
//! headless backend that tracks windows in memory; toolkit-backed
//! implementations plug in behind the same trait.

mod backend;
pub mod events;
mod headless;
mod types;

pub use backend::{WindowBackend, WindowError};
pub use events::WindowEvent;
pub use headless::{HeadlessBackend, HeadlessWindow};
pub use types::WindowTemplate;
