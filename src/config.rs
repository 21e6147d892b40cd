use std::env;
use std::path::PathBuf;

use crate::adapters::oci::{default_config_path, DEFAULT_PROFILE};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub config_file: PathBuf,
    pub profile: String,
    pub region: Option<String>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            config_file: env::var("OCI_CONFIG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_config_path()),
            profile: env::var("OCI_CLI_PROFILE").unwrap_or_else(|_| DEFAULT_PROFILE.to_string()),
            region: env::var("OCI_CLI_REGION").ok().filter(|r| !r.is_empty()),
            log_level: env::var("OCI_VM_ALARMS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Command-line flags win over the environment
    pub fn with_overrides(mut self, config_file: Option<PathBuf>, profile: Option<String>) -> Self {
        if let Some(config_file) = config_file {
            self.config_file = config_file;
        }
        if let Some(profile) = profile {
            self.profile = profile;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
