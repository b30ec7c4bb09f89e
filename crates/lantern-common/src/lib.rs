pub mod errors;

pub use errors::{ConfigError, LanternError};

pub type Result<T> = std::result::Result<T, LanternError>;
