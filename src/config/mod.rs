//! Configuration for the `dotart` CLI
//!
//! Provides types, discovery and parsing for `dotart.toml`.

pub mod loader;
pub mod schema;

pub use loader::{find_config, find_config_from, load_config, ConfigError, CONFIG_FILE_NAME};
pub use schema::*;
