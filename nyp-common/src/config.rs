//! Configuration loading and config file resolution
//!
//! Bootstrap configuration is a small TOML file. The file itself is located
//! using the following priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. Platform config directory (`<config_dir>/<app>/config.toml`)
//! 4. Compiled defaults (fallback)
//!
//! A missing file is never fatal: the tool warns and runs on compiled
//! defaults. A file that exists but cannot be parsed is a configuration error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "NYP_TRANSFORM_CONFIG";

/// Default file name for the edge list artifact
pub const DEFAULT_OUTPUT_FILE: &str = "nyp_collaboration_network.csv";

/// Default file name for the secondary (download) copy of the edge list
pub const DEFAULT_DOWNLOAD_FILE: &str = "nyp_network.csv";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Path of the edge list CSV
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Optional secondary copy of the edge list
    #[serde(default)]
    pub download_copy: Option<PathBuf>,

    /// Optional raw observation table (Source, Target, Date, WorkID)
    #[serde(default)]
    pub observations: Option<PathBuf>,

    /// Merge (A,B) and (B,A) into one pair by ordering names
    #[serde(default)]
    pub canonical_pairs: bool,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            download_copy: None,
            observations: None,
            canonical_pairs: false,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` argument
    CommandLine(PathBuf),
    /// Environment variable
    Environment(PathBuf),
    /// Platform config directory
    PlatformDefault(PathBuf),
    /// Environment variable named a file that does not exist
    MissingFile(PathBuf),
    /// No file found; compiled defaults in use
    CompiledDefaults,
}

impl ConfigSource {
    /// Path of the file that was read, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::CommandLine(p)
            | ConfigSource::Environment(p)
            | ConfigSource::PlatformDefault(p) => Some(p),
            ConfigSource::MissingFile(_) | ConfigSource::CompiledDefaults => None,
        }
    }
}

/// Configuration together with its provenance
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: TomlConfig,
    pub source: ConfigSource,
}

/// Locates and loads the configuration file for one tool
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    app_name: String,
    env_var_name: String,
}

impl ConfigResolver {
    /// Create a resolver using [`CONFIG_ENV_VAR`]
    pub fn new(app_name: impl Into<String>) -> Self {
        Self::with_env_var(app_name, CONFIG_ENV_VAR)
    }

    /// Create a resolver reading a custom environment variable
    pub fn with_env_var(app_name: impl Into<String>, env_var_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            env_var_name: env_var_name.into(),
        }
    }

    /// Platform config file path (`<config_dir>/<app>/config.toml`)
    pub fn platform_config_path(&self) -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(&self.app_name).join("config.toml"))
    }

    /// Resolve and load configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The command-line path does not exist (the operator asked for it)
    /// - A located file cannot be read or parsed
    pub fn resolve(&self, cli_arg: Option<&Path>) -> Result<ResolvedConfig> {
        // Priority 1: Command-line argument
        if let Some(path) = cli_arg {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok(ResolvedConfig {
                config: load_toml_config(path)?,
                source: ConfigSource::CommandLine(path.to_path_buf()),
            });
        }

        // Priority 2: Environment variable
        if let Ok(value) = std::env::var(&self.env_var_name) {
            if !value.is_empty() {
                let path = PathBuf::from(value);
                if !path.exists() {
                    return Ok(ResolvedConfig {
                        config: TomlConfig::default(),
                        source: ConfigSource::MissingFile(path),
                    });
                }
                return Ok(ResolvedConfig {
                    config: load_toml_config(&path)?,
                    source: ConfigSource::Environment(path),
                });
            }
        }

        // Priority 3: Platform config directory
        if let Some(path) = self.platform_config_path() {
            if path.exists() {
                return Ok(ResolvedConfig {
                    config: load_toml_config(&path)?,
                    source: ConfigSource::PlatformDefault(path),
                });
            }
        }

        // Priority 4: Compiled defaults
        Ok(ResolvedConfig {
            config: TomlConfig::default(),
            source: ConfigSource::CompiledDefaults,
        })
    }
}

/// Read and parse a TOML configuration file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse TOML {}: {}", path.display(), e)))
}
