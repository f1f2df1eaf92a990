// Public modules
pub mod defaults;
pub mod error;
pub mod inventory;
pub mod parity;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
