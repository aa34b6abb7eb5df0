use crate::core::db::ConnectOptions;
use crate::core::{Result, StudentDbError};
use crate::report::OutputFormat;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Database file used when neither the config nor the command line names one
pub const DEFAULT_DB_PATH: &str = "students_courses.db";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "studentdb.toml";

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub database: Option<DatabaseConfig>,
    pub output: Option<OutputConfig>,
}

/// Database-related configuration.
#[derive(Debug, Default, Deserialize)]
pub struct DatabaseConfig {
    pub path: Option<String>,
    pub foreign_keys: Option<bool>,
}

/// Report output configuration.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

impl Config {
    /// Database path, with `override_path` (the command-line argument) taking precedence
    pub fn db_path(&self, override_path: Option<&str>) -> PathBuf {
        override_path
            .map(str::to_string)
            .or_else(|| self.database.as_ref().and_then(|d| d.path.clone()))
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
            .into()
    }

    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            foreign_keys: self
                .database
                .as_ref()
                .and_then(|d| d.foreign_keys)
                .unwrap_or(false),
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }
}

/// Loads configuration from a TOML file at the given path.
///
/// # Example
///
/// ```no_run
/// let config = studentdb::config::load_config("studentdb.toml").expect("Failed to load config");
/// println!("{:?}", config);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| StudentDbError::Config(e.to_string()))
}

/// Candidate config files, in lookup order
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("studentdb").join("config.toml"));
    }
    paths
}

/// Loads the first config file that exists, or the defaults if none does
pub fn discover_config() -> Result<Config> {
    for path in config_search_paths() {
        if path.is_file() {
            debug!("Loading configuration from {:?}", path);
            return load_config(&path);
        }
    }
    debug!("No configuration file found, using defaults");
    Ok(Config::default())
}
