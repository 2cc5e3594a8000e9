//! TOML configuration stored under the platform config directory.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::api::DEFAULT_ENDPOINT;

/// Environment variable overriding the configured endpoint.
pub const ENDPOINT_ENV_VAR: &str = "CAUSERIE_ENDPOINT";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Chat endpoint URL (e.g., "http://127.0.0.1:5000/chat")
    pub endpoint: Option<String>,
    /// Transcript log file enabled at startup
    pub log_file: Option<String>,
}

impl Config {
    pub fn load() -> Result<Config, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path();
        Self::load_from_path(&config_path)
    }

    pub fn load_from_path(config_path: &PathBuf) -> Result<Config, Box<dyn std::error::Error>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to_path(&self, config_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    fn get_config_path() -> PathBuf {
        let proj_dirs = ProjectDirs::from("org", "permacommons", "causerie")
            .expect("Unable to determine config directory");
        proj_dirs.config_dir().join("config.toml")
    }

    /// Pick the endpoint to use: CLI flag, then environment variable, then
    /// this config, then the built-in default.
    pub fn resolve_endpoint(&self, cli_endpoint: Option<String>) -> String {
        self.resolve_endpoint_with_env(cli_endpoint, std::env::var(ENDPOINT_ENV_VAR).ok())
    }

    fn resolve_endpoint_with_env(
        &self,
        cli_endpoint: Option<String>,
        env_endpoint: Option<String>,
    ) -> String {
        cli_endpoint
            .or(env_endpoint)
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }
}
