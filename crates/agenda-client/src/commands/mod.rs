//! Subcommand implementations.

pub mod calendars;
pub mod config;
pub mod init;
pub mod run;
