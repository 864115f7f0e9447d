//! # Buddy Core
//! Shared foundation for the Buddy assistant — message and tool types,
//! the error taxonomy, the `Provider`/`Tool`/`Embedder` traits, and the
//! TOML configuration system.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::BuddyConfig;
pub use error::{BuddyError, Result};
