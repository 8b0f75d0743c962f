//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/agenda/config.toml` by default.
//!
//! The file carries a `version` key. A file written for another version
//! (or without the key) is discarded and replaced by the defaults; fields
//! are not migrated.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use agenda_core::{DEFAULT_EVENT_TEMPLATE, DEFAULT_TIME_FORMAT};
use agenda_providers::ProviderConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// The configuration schema version this build reads and writes.
pub const CONFIG_VERSION: u32 = 1;

/// Provider selected by the default configuration.
pub const DEFAULT_PROVIDER: &str = "morgen";

/// Errors from loading or saving the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`Config`].
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The file or its directory could not be written.
    #[error("failed to write config {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

fn default_event_template() -> String {
    DEFAULT_EVENT_TEMPLATE.to_string()
}

/// Configuration for the agenda client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version. Absent in a file means 0.
    #[serde(default)]
    pub version: u32,

    /// Name of the provider to fetch from; a key of `providers`.
    #[serde(default = "default_provider")]
    pub provider: String,

    /// `strftime` format for `{start_time_formatted}` and `{end_time_formatted}`.
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Template for one agenda line.
    #[serde(default = "default_event_template")]
    pub event_template: String,

    /// Connection settings per provider name.
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
}

impl Default for Config {
    fn default() -> Self {
        let mut providers = BTreeMap::new();
        providers.insert(DEFAULT_PROVIDER.to_string(), ProviderConfig::morgen_default());

        Self {
            version: CONFIG_VERSION,
            provider: default_provider(),
            time_format: default_time_format(),
            event_template: default_event_template(),
            providers,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Provider name.
    pub provider: Option<String>,
    /// Time format.
    pub time_format: Option<String>,
    /// Event template.
    pub event_template: Option<String>,
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("agenda")
    }

    /// Loads the configuration at `path`, creating it on first use.
    ///
    /// - No file: the defaults are written to `path` and returned.
    /// - Version other than [`CONFIG_VERSION`]: the file is overwritten with
    ///   the defaults, which are returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, and `Read`/`Write`
    /// errors for I/O failures.
    pub fn load_or_initialize(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("no config at {}, writing defaults", path.display());
            let config = Self::default();
            config.persist(path)?;
            return Ok(config);
        }

        let config = Self::load_from(path)?;
        if config.version != CONFIG_VERSION {
            warn!(
                "config {} has version {}, expected {}; replacing with defaults",
                path.display(),
                config.version,
                CONFIG_VERSION
            );
            let config = Self::default();
            config.persist(path)?;
            return Ok(config);
        }

        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads configuration from a specific path without any defaulting.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serializes to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the configuration to `path`.
    ///
    /// Parent directories are created as needed. The content goes to a
    /// temporary sibling first and is renamed over `path`, so an interrupted
    /// write never leaves a truncated file behind.
    pub fn persist(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml()?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content).map_err(write_err)?;
        fs::rename(&tmp_path, path).map_err(write_err)?;

        debug!("saved config to {}", path.display());
        Ok(())
    }

    /// Applies command-line overrides. Nothing is persisted.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(ref provider) = overrides.provider {
            self.provider = provider.clone();
        }
        if let Some(ref time_format) = overrides.time_format {
            self.time_format = time_format.clone();
        }
        if let Some(ref event_template) = overrides.event_template {
            self.event_template = event_template.clone();
        }
    }

    /// Returns the entry of the selected provider, if configured.
    pub fn selected_provider(&self) -> Option<&ProviderConfig> {
        self.providers.get(&self.provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod defaults {
        use super::*;

        #[test]
        fn default_values() {
            let config = Config::default();
            assert_eq!(config.version, CONFIG_VERSION);
            assert_eq!(config.provider, "morgen");
            assert_eq!(config.time_format, "%H:%M");
            assert_eq!(
                config.event_template,
                "- {start_time_formatted}-{end_time_formatted}: {title}"
            );

            let morgen = config.selected_provider().unwrap();
            assert_eq!(morgen.base_url, "https://api.morgen.so/v3");
            assert_eq!(morgen.env_api_key, "MORGEN_API_KEY");
            assert!(morgen.headers["Authorization"].contains("{API_KEY}"));
        }

        #[test]
        fn default_path_ends_with_agenda_config() {
            let path = Config::default_path();
            assert!(path.ends_with("agenda/config.toml"));
        }

        #[test]
        fn toml_shape() {
            let toml_str = Config::default().to_toml().unwrap();
            assert!(toml_str.contains("version = 1"));
            assert!(toml_str.contains("provider = \"morgen\""));
            assert!(toml_str.contains("[providers.morgen]"));
            assert!(toml_str.contains("env_api_key = \"MORGEN_API_KEY\""));
            assert!(toml_str.contains("Authorization = \"ApiKey {API_KEY}\""));
        }
    }

    mod store {
        use super::*;

        #[test]
        fn round_trip() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.toml");

            let config = Config::default();
            config.persist(&path).unwrap();
            assert_eq!(Config::load_from(&path).unwrap(), config);
        }

        #[test]
        fn round_trip_customized() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.toml");

            let mut config = Config::default();
            config.time_format = "%I:%M %p".to_string();
            if let Some(morgen) = config.providers.get_mut("morgen") {
                morgen.calendars_to_ignore = vec!["Birthdays".to_string()];
                morgen.timeout_secs = 10;
            }
            config.persist(&path).unwrap();
            assert_eq!(Config::load_or_initialize(&path).unwrap(), config);
        }

        #[test]
        fn first_use_creates_file_and_parents() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested").join("agenda").join("config.toml");

            let config = Config::load_or_initialize(&path).unwrap();
            assert_eq!(config, Config::default());
            assert!(path.exists());
            assert!(!path.with_extension("toml.tmp").exists());
            assert_eq!(Config::load_from(&path).unwrap(), config);
        }

        #[test]
        fn stale_version_is_replaced() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.toml");

            let mut stale = Config::default();
            stale.version = 0;
            stale.time_format = "%H.%M".to_string();
            stale.persist(&path).unwrap();

            let loaded = Config::load_or_initialize(&path).unwrap();
            assert_eq!(loaded, Config::default());
            assert_eq!(Config::load_from(&path).unwrap(), Config::default());
        }

        #[test]
        fn missing_version_is_stale() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.toml");
            fs::write(&path, "provider = \"morgen\"\ntime_format = \"%H.%M\"\n").unwrap();

            let loaded = Config::load_or_initialize(&path).unwrap();
            assert_eq!(loaded.version, CONFIG_VERSION);
            assert_eq!(loaded.time_format, "%H:%M");
        }

        #[test]
        fn future_version_is_replaced() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.toml");

            let mut newer = Config::default();
            newer.version = CONFIG_VERSION + 1;
            newer.persist(&path).unwrap();

            assert_eq!(Config::load_or_initialize(&path).unwrap().version, CONFIG_VERSION);
        }

        #[test]
        fn malformed_file_is_parse_error() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.toml");
            fs::write(&path, "version = [unclosed").unwrap();

            let err = Config::load_or_initialize(&path).unwrap_err();
            assert!(matches!(err, ConfigError::Parse { .. }));
            assert!(err.to_string().contains("config.toml"));
            // the broken file is left for the user to fix
            assert_eq!(fs::read_to_string(&path).unwrap(), "version = [unclosed");
        }

        #[test]
        fn unwritable_location_is_write_error() {
            let dir = tempfile::tempdir().unwrap();
            let blocker = dir.path().join("file");
            fs::write(&blocker, "").unwrap();

            let err = Config::default()
                .persist(&blocker.join("config.toml"))
                .unwrap_err();
            assert!(matches!(err, ConfigError::Write { .. }));
        }
    }

    mod overrides {
        use super::*;

        #[test]
        fn applied_fields_only() {
            let mut config = Config::default();
            config.apply_overrides(&Overrides {
                provider: None,
                time_format: Some("%I:%M %p".to_string()),
                event_template: Some("* {title}".to_string()),
            });

            assert_eq!(config.provider, "morgen");
            assert_eq!(config.time_format, "%I:%M %p");
            assert_eq!(config.event_template, "* {title}");
        }

        #[test]
        fn empty_overrides_change_nothing() {
            let mut config = Config::default();
            config.apply_overrides(&Overrides::default());
            assert_eq!(config, Config::default());
        }

        #[test]
        fn never_persisted() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.toml");

            let mut config = Config::load_or_initialize(&path).unwrap();
            config.apply_overrides(&Overrides {
                provider: Some("other".to_string()),
                ..Default::default()
            });

            assert_eq!(Config::load_from(&path).unwrap().provider, "morgen");
        }
    }
}
