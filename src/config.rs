use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::marker;

/// Represents the complete configuration for ci-release.
///
/// Everything here can also be supplied on the command line; CLI arguments
/// take precedence over file values.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub release: ReleaseConfig,
}

/// Remote repository coordinates.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RemoteConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default)]
    pub organization: Option<String>,

    #[serde(default)]
    pub repository: Option<String>,

    #[serde(default)]
    pub username: Option<String>,
}

fn default_host() -> String {
    "github.com".to_string()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            host: default_host(),
            organization: None,
            repository: None,
            username: None,
        }
    }
}

/// Release behavior configuration.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReleaseConfig {
    #[serde(default = "default_marker_file")]
    pub marker_file: String,
}

fn default_marker_file() -> String {
    marker::DEFAULT_MARKER_FILE.to_string()
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            marker_file: default_marker_file(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `ci-release.toml` in current directory
/// 3. `ci-release.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./ci-release.toml").exists() {
        fs::read_to_string("./ci-release.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("ci-release.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
