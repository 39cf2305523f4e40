use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Base origin of the subtitle listing site
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OMDb API endpoint for identifier lookup
    #[serde(default = "default_omdb_endpoint")]
    pub omdb_endpoint: String,

    /// Accepted languages (tokens resolved to English names at startup)
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// Working directory for extracted subtitle files
    #[serde(default = "default_workdir")]
    pub workdir: PathBuf,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_base_url() -> String {
    "https://www.yifysubtitles.com".to_string()
}

fn default_omdb_endpoint() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_languages() -> Vec<String> {
    vec!["English".to_string()]
}

fn default_workdir() -> PathBuf {
    std::env::temp_dir().join("yifysub")
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            omdb_endpoint: default_omdb_endpoint(),
            languages: default_languages(),
            workdir: default_workdir(),
            timeout_secs: default_timeout_secs(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)
            .map_err(|e| anyhow!("Invalid base_url '{}': {}", self.base_url, e))?;
        url::Url::parse(&self.omdb_endpoint)
            .map_err(|e| anyhow!("Invalid omdb_endpoint '{}': {}", self.omdb_endpoint, e))?;

        if self.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be greater than zero"));
        }
        if self.workdir.as_os_str().is_empty() {
            return Err(anyhow!("workdir must not be empty"));
        }

        Ok(())
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Corresponding filter for the log facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}
