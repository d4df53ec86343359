//! Karabatch Common Library
//!
//! Shared types and errors for the Karabatch platform.

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;

/// Karabatch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
