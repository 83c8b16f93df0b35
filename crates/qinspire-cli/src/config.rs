//! CLI configuration.
//!
//! Precedence, highest first: command-line flags, environment variables,
//! the YAML file, built-in defaults.
//!
//! ```yaml
//! api_url: https://api.quantum-inspire.com
//! email: you@example.com
//! project: Grover
//! collect_tries: 120
//! engine:
//!   shots: 2048
//!   num_qubits: 5
//!   backend: default
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use qinspire_engine::EngineConfig;
use qinspire_hal::BackendConfig;

/// Default configuration file, relative to the home directory.
const DEFAULT_CONFIG_FILE: &str = ".qinspire/config.yaml";

/// Settings shared by all commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Quantum Inspire API base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// API token.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Account email for basic authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Account password for basic authentication.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    /// Named project to run jobs in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Status polls before a job times out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collect_tries: Option<u32>,
    /// Engine defaults.
    pub engine: EngineConfig,
}

impl CliConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_yaml_ng::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load the explicit file, or the default one if it exists, then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        Ok(config.merge_env())
    }

    fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply `QI_*` overrides from `lookup`. Unset variables leave the
    /// current values unchanged.
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("QI_API_URL") {
            self.api_url = Some(v);
        }
        if let Some(v) = lookup("QI_TOKEN") {
            self.token = Some(v);
        }
        if let Some(v) = lookup("QI_EMAIL") {
            self.email = Some(v);
        }
        if let Some(v) = lookup("QI_PASSWORD") {
            self.password = Some(v);
        }
        if let Some(v) = lookup("QI_PROJECT") {
            self.project = Some(v);
        }
        self
    }

    /// Executor configuration for the Quantum Inspire adapter.
    pub fn backend_config(&self) -> BackendConfig {
        let mut config = BackendConfig::new("quantum-inspire");
        if let Some(url) = &self.api_url {
            config = config.with_endpoint(url);
        }
        if let Some(token) = &self.token {
            config = config.with_token(token);
        }
        if let Some(email) = &self.email {
            config = config.with_extra("email", serde_json::Value::from(email.as_str()));
        }
        if let Some(password) = &self.password {
            config = config.with_extra("password", serde_json::Value::from(password.as_str()));
        }
        if let Some(project) = &self.project {
            config = config.with_extra("project", serde_json::Value::from(project.as_str()));
        }
        if let Some(tries) = self.collect_tries {
            config = config.with_extra("collect_tries", serde_json::Value::from(tries));
        }
        config
    }
}

/// `~/.qinspire/config.yaml`, if the home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_CONFIG_FILE))
}
