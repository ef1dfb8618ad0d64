//! JSON document file model repository

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::{ensure_unique_share_id, DomainError, Model, ModelFilter, ModelRepository};

/// Model repository backed by a single JSON file holding an array of model documents.
///
/// Reads are served from memory. Every write rewrites the whole file; the in-memory
/// state only changes once the file write succeeded.
#[derive(Debug)]
pub struct JsonFileModelRepository {
    path: PathBuf,
    models: RwLock<HashMap<String, Model>>,
    write_lock: Mutex<()>,
}

impl JsonFileModelRepository {
    /// Open the repository, loading existing documents. A missing file is an empty repository.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let models = load_models(&path).await?;

        info!(path = %path.display(), count = models.len(), "Loaded model documents");

        Ok(Self {
            path,
            models: RwLock::new(models),
            write_lock: Mutex::new(()),
        })
    }

    fn snapshot(&self) -> Result<HashMap<String, Model>, DomainError> {
        self.models
            .read()
            .map(|models| models.clone())
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    async fn commit(&self, models: HashMap<String, Model>) -> Result<(), DomainError> {
        persist_models(&self.path, &models).await?;

        let mut current = self
            .models
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;
        *current = models;

        Ok(())
    }
}

#[async_trait]
impl ModelRepository for JsonFileModelRepository {
    async fn find_one(&self, filter: &ModelFilter) -> Result<Option<Model>, DomainError> {
        let models = self
            .models
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(models.values().find(|m| filter.matches(m)).cloned())
    }

    async fn create(&self, model: Model) -> Result<Model, DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut models = self.snapshot()?;
        let id = model.id().to_string();

        if models.contains_key(&id) {
            return Err(DomainError::conflict(format!(
                "Model with ID '{}' already exists",
                id
            )));
        }

        ensure_unique_share_id(models.values(), &model)?;
        models.insert(id, model.clone());
        self.commit(models).await?;

        debug!(model_id = %model.id(), "Model document created");
        Ok(model)
    }

    async fn update(&self, model: Model) -> Result<Model, DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut models = self.snapshot()?;
        let id = model.id().to_string();

        if !models.contains_key(&id) {
            return Err(DomainError::not_found(format!("Model '{}' not found", id)));
        }

        ensure_unique_share_id(models.values(), &model)?;
        models.insert(id, model.clone());
        self.commit(models).await?;

        debug!(model_id = %model.id(), "Model document updated");
        Ok(model)
    }
}

async fn load_models(path: &Path) -> Result<HashMap<String, Model>, DomainError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => {
            return Err(DomainError::storage(format!(
                "Failed to read '{}': {}",
                path.display(),
                e
            )));
        }
    };

    if content.trim().is_empty() {
        return Ok(HashMap::new());
    }

    let documents: Vec<Model> = serde_json::from_str(&content).map_err(|e| {
        DomainError::storage(format!("Failed to parse '{}': {}", path.display(), e))
    })?;

    Ok(documents
        .into_iter()
        .map(|model| (model.id().to_string(), model))
        .collect())
}

async fn persist_models(path: &Path, models: &HashMap<String, Model>) -> Result<(), DomainError> {
    let mut documents: Vec<&Model> = models.values().collect();
    documents.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.id().as_str().cmp(b.id().as_str()))
    });

    let content = serde_json::to_string_pretty(&documents)
        .map_err(|e| DomainError::storage(format!("Failed to serialize models: {}", e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            DomainError::storage(format!("Failed to create '{}': {}", parent.display(), e))
        })?;
    }

    let tmp_path = path.with_extension("json.tmp");

    tokio::fs::write(&tmp_path, content).await.map_err(|e| {
        DomainError::storage(format!("Failed to write '{}': {}", tmp_path.display(), e))
    })?;

    tokio::fs::rename(&tmp_path, path).await.map_err(|e| {
        DomainError::storage(format!("Failed to replace '{}': {}", path.display(), e))
    })
}
