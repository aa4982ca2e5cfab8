//! # pagia-cli
//!
//! Command-line interface for the PAGIA assistant.
//!
//! ## Commands
//!
//! - `pagia chat` — Interactive chat in the terminal
//! - `pagia skill` — List, inspect, and run skills
//! - `pagia serve` — Start the workflow REST API
//! - `pagia status` — Check whether the workflow API is up
//! - `pagia config` — Show current configuration

pub mod commands;
pub mod registry;

pub use commands::Cli;
pub use registry::{Command, CommandRegistry, DefaultHandler};
