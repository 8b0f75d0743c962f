//! Command-line interface definition.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::config::{Config, Overrides};

/// agenda - Today's meetings as a markdown snippet
#[derive(Debug, Parser)]
#[command(name = "agenda")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "AGENDA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Calendar provider to use (a key of [providers] in the config)
    #[arg(long, short)]
    pub provider: Option<String>,

    /// strftime format for event times, e.g. "%I:%M %p"
    #[arg(long, short)]
    pub time_format: Option<String>,

    /// Template for one agenda line, e.g. "- {start_time_formatted}: {title}"
    #[arg(long, short)]
    pub event_template: Option<String>,

    /// Day to show (YYYY-MM-DD), defaults to today
    #[arg(long, short)]
    pub date: Option<NaiveDate>,

    /// Enable debug output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Returns the configuration file to use.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Returns the config overrides given on the command line.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            provider: self.provider.clone(),
            time_format: self.time_format.clone(),
            event_template: self.event_template.clone(),
        }
    }
}

/// Available commands. Without one, the agenda is printed.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long, short)]
        force: bool,
    },

    /// List calendars and whether they are included
    Calendars,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump the effective configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
