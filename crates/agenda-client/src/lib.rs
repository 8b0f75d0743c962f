//! CLI, configuration store and agenda rendering
//!
//! This crate provides the `agenda` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::{Config, ConfigError, Overrides};
pub use error::{ClientError, ClientResult};
