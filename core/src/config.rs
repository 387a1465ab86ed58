//! Handles the configuration of the daemon and the client.
//!
//! this module is responsible for parsing the Songbook.toml file, layering environment variables
//! on top of it, and applying overrides from the command line.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

pub static DEFAULT_CONFIG: &str = include_str!("../Songbook.toml");

#[derive(Clone, Debug, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    /// Settings for the catalog service
    #[serde(default)]
    pub daemon: DaemonSettings,
    /// Settings for the command line client
    #[serde(default)]
    pub client: ClientSettings,
}

impl Settings {
    /// Load settings from the config file, environment variables, and CLI arguments.
    ///
    /// The environment variables are prefixed with `SONGBOOK_`,
    /// nested keys are separated by a double underscore (e.g. `SONGBOOK_DAEMON__PORT`).
    ///
    /// # Arguments
    ///
    /// * `config` - path to the config file.
    /// * `port` - overrides the port of the daemon, if set.
    /// * `log_level` - overrides the log level of the daemon, if set.
    ///
    /// # Errors
    ///
    /// This function will return an error if the config file is not found or if the config file is
    /// invalid.
    #[inline]
    pub fn init(
        config: PathBuf,
        port: Option<u16>,
        log_level: Option<log::LevelFilter>,
    ) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::from(config))
            .add_source(
                Environment::with_prefix("SONGBOOK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Self = s.try_deserialize()?;

        if let Some(port) = port {
            settings.daemon.port = port;
        }

        if let Some(log_level) = log_level {
            settings.daemon.log_level = log_level;
        }

        Ok(settings)
    }

    /// Get the (default) path to the config file.
    /// If the config file does not exist at this path, it will be created with the default config.
    ///
    /// See [`crate::get_config_dir`] for more information about where this default path is located.
    ///
    /// # Errors
    ///
    /// This function will return an error if the system config directory (e.g., `~/.config` on linux) could not be found, or if the config file was missing and could not be created.
    #[inline]
    pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
        match crate::get_config_dir() {
            Ok(config_dir) => {
                // if the config directory does not exist, create it
                if !config_dir.exists() {
                    std::fs::create_dir_all(&config_dir)?;
                }
                let config_file = config_dir.join("Songbook.toml");

                if !config_file.exists() {
                    std::fs::write(&config_file, DEFAULT_CONFIG)?;
                }

                Ok(config_file)
            }
            Err(e) => Err(std::io::Error::new(std::io::ErrorKind::NotFound, e)),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct DaemonSettings {
    /// The port to listen on for HTTP requests.
    /// Default is 3000.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Connection string of the database, e.g. `mem://` or `surrealkv://<path>`.
    /// If unset, an embedded database in the data directory is used,
    /// see [`DaemonSettings::database_url`].
    #[serde(default)]
    pub db_url: Option<String>,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_database")]
    pub database: String,
    /// What level of logging to use.
    /// Default is "info".
    #[serde(default = "default_log_level")]
    #[serde(deserialize_with = "de_log_level")]
    pub log_level: log::LevelFilter,
}

impl DaemonSettings {
    /// The database to connect to, falling back to an embedded `surrealkv` store under `data_dir`.
    #[must_use]
    #[inline]
    pub fn database_url(&self, data_dir: &Path) -> String {
        self.db_url.clone().unwrap_or_else(|| {
            format!("surrealkv://{}", data_dir.join("db").to_string_lossy())
        })
    }
}

fn de_log_level<'de, D>(deserializer: D) -> Result<log::LevelFilter, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(log::LevelFilter::from_str(&s).unwrap_or_else(|_| default_log_level()))
}

const fn default_port() -> u16 {
    3000
}

fn default_namespace() -> String {
    "songbook".into()
}

fn default_database() -> String {
    "catalog".into()
}

const fn default_log_level() -> log::LevelFilter {
    log::LevelFilter::Info
}

impl Default for DaemonSettings {
    #[inline]
    fn default() -> Self {
        Self {
            port: default_port(),
            db_url: None,
            namespace: default_namespace(),
            database: default_database(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ClientSettings {
    /// Base URL of the catalog API.
    /// Default is `http://localhost:3000/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// How many songs to fetch per page.
    /// Default is 10.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".into()
}

const fn default_page_size() -> u64 {
    10
}

impl Default for ClientSettings {
    #[inline]
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
        }
    }
}
