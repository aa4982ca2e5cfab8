//! # pagia-config
//!
//! Configuration system for PAGIA. Reads from `pagia.toml`, environment
//! variables, and CLI overrides — in that precedence order.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{LoggingConfig, PagiaConfig, ProviderConfig, ServerConfig, SessionConfig};
