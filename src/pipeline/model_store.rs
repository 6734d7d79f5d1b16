//! Persistence for the live model artifact.
//!
//! The pipeline receives a `ModelStore` handle instead of reaching for a
//! global file path, so tests can swap in `InMemoryModelStore`. A missing
//! artifact is `Ok(None)`, never an error.

use crate::error::{Result, TriageError};
use crate::pipeline::model::FittedModel;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};

/// Holder of the single live model artifact
pub trait ModelStore: Send + Sync {
    /// Load the current model, `None` if nothing has been trained yet
    fn load(&self) -> Result<Option<FittedModel>>;

    /// Replace the current model; last writer wins
    fn save(&self, model: &FittedModel) -> Result<()>;

    /// Whether an artifact is present
    fn exists(&self) -> bool;
}

/// Model artifact stored as a bincode file on local disk
#[derive(Debug, Clone)]
pub struct FileModelStore {
    path: PathBuf,
}

impl FileModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "model".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ModelStore for FileModelStore {
    fn load(&self) -> Result<Option<FittedModel>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No model artifact at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let model: FittedModel = bincode::deserialize(&bytes)?;
        debug!(
            "Loaded model trained on {} samples from {}",
            model.sample_count,
            self.path.display()
        );
        Ok(Some(model))
    }

    fn save(&self, model: &FittedModel) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let bytes = bincode::serialize(model)?;
        let temp = self.temp_path();
        std::fs::write(&temp, bytes)?;
        // rename is atomic on the same filesystem, so readers never see a partial file
        std::fs::rename(&temp, &self.path)?;

        info!("Model artifact written to {}", self.path.display());
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }
}

/// Process-local model store
#[derive(Debug, Default)]
pub struct InMemoryModelStore {
    model: RwLock<Option<FittedModel>>,
}

impl InMemoryModelStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModelStore for InMemoryModelStore {
    fn load(&self) -> Result<Option<FittedModel>> {
        let guard = self
            .model
            .read()
            .map_err(|e| TriageError::Other(format!("Model lock poisoned: {}", e)))?;
        Ok(guard.clone())
    }

    fn save(&self, model: &FittedModel) -> Result<()> {
        let mut guard = self
            .model
            .write()
            .map_err(|e| TriageError::Other(format!("Model lock poisoned: {}", e)))?;
        *guard = Some(model.clone());
        Ok(())
    }

    fn exists(&self) -> bool {
        self.model.read().map(|g| g.is_some()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Priority, TrainingExample};
    use tempfile::TempDir;

    fn sample_model() -> FittedModel {
        FittedModel::fit(&[
            TrainingExample::new("file taxes", Priority::High),
            TrainingExample::new("read novel", Priority::Low),
        ])
        .unwrap()
    }

    #[test]
    fn test_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileModelStore::new(temp_dir.path().join("model.bin"));
        assert!(!store.exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_persists_model() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("model.bin");
        let store = FileModelStore::new(&path);
        let model = sample_model();

        store.save(&model).unwrap();
        assert!(store.exists());
        assert!(!temp_dir.path().join("nested").join("model.bin.tmp").exists());

        let reopened = FileModelStore::new(&path);
        assert_eq!(reopened.load().unwrap(), Some(model));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("model.bin");
        std::fs::write(&path, b"not a model").unwrap();

        let store = FileModelStore::new(&path);
        assert!(store.load().is_err());
    }

    #[test]
    fn test_in_memory_store_replaces_model() {
        let store = InMemoryModelStore::new();
        assert!(!store.exists());

        let model = sample_model();
        store.save(&model).unwrap();
        assert!(store.exists());
        assert_eq!(store.load().unwrap().unwrap().sample_count, 2);
    }
}
