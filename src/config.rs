//! Configuration for triage
//!
//! Values are layered, later sources winning:
//! 1. Built-in defaults (data files under the platform data directory)
//! 2. A TOML file (`--config`, or `~/.config/triage/config.toml` if present)
//! 3. Environment variables prefixed `TRIAGE_` (e.g. `TRIAGE_MODEL_PATH`)
//!
//! CLI flags are applied on top by the binary.

use crate::error::Result;
use crate::service::DEFAULT_MAX_CONTENT_LEN;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const ENV_PREFIX: &str = "TRIAGE";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Path to the task database
    pub database_path: String,
    /// Path to the fitted model artifact
    pub model_path: String,
    /// HTTP listen address for `triage serve`
    pub listen_addr: String,
    /// Maximum task content length in characters
    pub max_content_len: usize,
}

/// Platform data directory for triage files
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("triage")
}

fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("triage").join("config.toml"))
}

impl Default for TriageConfig {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            database_path: data_dir.join("tasks.db").to_string_lossy().to_string(),
            model_path: data_dir
                .join("task_priority_model.bin")
                .to_string_lossy()
                .to_string(),
            listen_addr: "127.0.0.1:5000".to_string(),
            max_content_len: DEFAULT_MAX_CONTENT_LEN,
        }
    }
}

impl TriageConfig {
    /// Load configuration from defaults, an optional file, and the environment
    ///
    /// An explicitly given file must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("database_path", defaults.database_path)?
            .set_default("model_path", defaults.model_path)?
            .set_default("listen_addr", defaults.listen_addr)?
            .set_default("max_content_len", defaults.max_content_len as i64)?;

        match config_file {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(path) = default_config_file() {
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize::<TriageConfig>()?;

        debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }
}
