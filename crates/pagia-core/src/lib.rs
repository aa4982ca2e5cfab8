//! # pagia-core
//!
//! Core types and the unified error type for the PAGIA assistant.
//! This crate defines the shared vocabulary used by every other crate
//! in the workspace.

pub mod context;
pub mod error;

pub use context::SessionContext;
pub use error::{PagiaError, Result};
