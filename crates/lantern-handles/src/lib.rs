//! Autokeying handle registry.
//!
//! Hands out opaque string keys for objects that live on this side of the
//! RPC boundary, and resolves those keys back to the stored references.
//! Keys are decimal counter values: `"0"`, `"1"`, `"2"`, ...

pub mod keys;
mod registry;

pub use keys::probe_key;
pub use registry::HandleRegistry;
