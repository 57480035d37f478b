use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{QueryTagsError, Result};

/// GitHub caps GraphQL connections at 100 nodes per page.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Represents the complete configuration for query-tags.
///
/// Contains the default repository, the external tool locations and query tuning.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub query: QueryConfig,
}

fn default_owner() -> String {
    "swiftlang".to_string()
}

fn default_name() -> String {
    "swift".to_string()
}

/// Repository queried when `--repo` does not say otherwise.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryConfig {
    #[serde(default = "default_owner")]
    pub owner: String,

    #[serde(default = "default_name")]
    pub name: String,

    /// Take the default from the `origin` remote of the current git checkout.
    #[serde(default)]
    pub use_git_remote: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            owner: default_owner(),
            name: default_name(),
            use_git_remote: false,
        }
    }
}

fn default_gh() -> String {
    "gh".to_string()
}

fn default_jq() -> String {
    "jq".to_string()
}

/// Locations of the external executables.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ToolsConfig {
    #[serde(default = "default_gh")]
    pub gh: String,

    #[serde(default = "default_jq")]
    pub jq: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            gh: default_gh(),
            jq: default_jq(),
        }
    }
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_cache() -> String {
    "5m".to_string()
}

/// Query tuning.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct QueryConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// TTL handed to `gh api --cache`. Empty disables caching.
    #[serde(default = "default_cache")]
    pub cache: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            page_size: default_page_size(),
            cache: default_cache(),
        }
    }
}

impl QueryConfig {
    /// Page size clamped to what the GraphQL API accepts.
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `querytags.toml` in current directory
/// 3. `~/.config/.querytags.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| QueryTagsError::config(format!("cannot read {}: {}", path, e)))?
    } else if Path::new("./querytags.toml").exists() {
        fs::read_to_string("./querytags.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".querytags.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses a TOML document into a [Config], filling in defaults.
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| QueryTagsError::config(e.to_string()))
}
