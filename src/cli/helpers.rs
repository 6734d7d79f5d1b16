//! Shared helper functions for CLI commands
//!
//! Resolves configuration from the config file, environment, and global
//! flags, then wires the task repository and model store into a service.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use triage_core::{
    error::Result, ConnectionMode, FileModelStore, LibsqlTaskRepository, PriorityPipeline,
    TaskService, TriageConfig,
};

/// Global flags that override file and environment configuration
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub db_path: Option<String>,
    pub model_path: Option<String>,
}

/// Load configuration and apply CLI overrides
pub fn resolve_config(args: &GlobalArgs) -> Result<TriageConfig> {
    let mut config = TriageConfig::load(args.config.as_deref())?;

    if let Some(db_path) = &args.db_path {
        config.database_path = db_path.clone();
    }
    if let Some(model_path) = &args.model_path {
        config.model_path = model_path.clone();
    }

    debug!("Using database: {}", config.database_path);
    debug!("Using model: {}", config.model_path);
    Ok(config)
}

/// Open the task database and model store named by the configuration
pub async fn build_service(config: &TriageConfig) -> Result<TaskService> {
    let mode = ConnectionMode::Local(config.database_path.clone());
    let repo = LibsqlTaskRepository::new(mode).await?;
    let pipeline = PriorityPipeline::new(Arc::new(FileModelStore::new(&config.model_path)));

    Ok(TaskService::new(Arc::new(repo), pipeline).with_max_content_len(config.max_content_len))
}

/// Resolve configuration and build the service in one step
pub async fn open_service(args: &GlobalArgs) -> Result<TaskService> {
    let config = resolve_config(args)?;
    build_service(&config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_flags_override_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("triage.toml");
        std::fs::write(&config_path, "database_path = \"/tmp/file.db\"\n").unwrap();

        let args = GlobalArgs {
            config: Some(config_path),
            db_path: Some("/tmp/flag.db".to_string()),
            model_path: None,
        };

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.database_path, "/tmp/flag.db");
        assert!(config.model_path.ends_with("task_priority_model.bin"));
    }
}
