//! Model repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{Model, ModelFilter};
use crate::domain::DomainError;

/// Repository trait for Model persistence
///
/// Share IDs are unique across models: `create` and `update` reject a model whose
/// share ID is already held by another model with `DomainError::Conflict`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ModelRepository: Send + Sync + std::fmt::Debug {
    /// Find the single model matching the filter
    async fn find_one(&self, filter: &ModelFilter) -> Result<Option<Model>, DomainError>;

    /// Create a new model
    async fn create(&self, model: Model) -> Result<Model, DomainError>;

    /// Replace an existing model
    async fn update(&self, model: Model) -> Result<Model, DomainError>;
}

/// Fail with `Conflict` when another stored model already uses `model`'s share ID
pub fn ensure_unique_share_id<'a>(
    existing: impl IntoIterator<Item = &'a Model>,
    model: &Model,
) -> Result<(), DomainError> {
    let Some(share) = model.share_options() else {
        return Ok(());
    };

    let taken = existing.into_iter().any(|other| {
        other.id() != model.id()
            && other
                .share_options()
                .is_some_and(|other_share| other_share.id == share.id)
    });

    if taken {
        return Err(DomainError::conflict(format!(
            "Share ID '{}' is already in use",
            share.id
        )));
    }

    Ok(())
}

/// In-memory implementation of ModelRepository
pub mod in_memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// In-memory implementation of ModelRepository for testing and development
    #[derive(Debug, Default)]
    pub struct InMemoryModelRepository {
        models: RwLock<HashMap<String, Model>>,
    }

    impl InMemoryModelRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_models(models: Vec<Model>) -> Self {
            let map = models
                .into_iter()
                .map(|model| (model.id().to_string(), model))
                .collect();

            Self {
                models: RwLock::new(map),
            }
        }

        /// Snapshot of every stored model
        pub fn all(&self) -> Result<Vec<Model>, DomainError> {
            let models = self
                .models
                .read()
                .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

            Ok(models.values().cloned().collect())
        }
    }

    #[async_trait]
    impl ModelRepository for InMemoryModelRepository {
        async fn find_one(&self, filter: &ModelFilter) -> Result<Option<Model>, DomainError> {
            let models = self
                .models
                .read()
                .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

            if let ModelFilter::Id(id) = filter {
                return Ok(models.get(id.as_str()).cloned());
            }

            Ok(models.values().find(|m| filter.matches(m)).cloned())
        }

        async fn create(&self, model: Model) -> Result<Model, DomainError> {
            let mut models = self
                .models
                .write()
                .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

            let id = model.id().to_string();

            if models.contains_key(&id) {
                return Err(DomainError::conflict(format!(
                    "Model with ID '{}' already exists",
                    id
                )));
            }

            ensure_unique_share_id(models.values(), &model)?;
            models.insert(id, model.clone());
            Ok(model)
        }

        async fn update(&self, model: Model) -> Result<Model, DomainError> {
            let mut models = self
                .models
                .write()
                .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

            let id = model.id().to_string();

            if !models.contains_key(&id) {
                return Err(DomainError::not_found(format!("Model '{}' not found", id)));
            }

            ensure_unique_share_id(models.values(), &model)?;
            models.insert(id, model.clone());
            Ok(model)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::in_memory::InMemoryModelRepository;
    use super::*;
    use crate::domain::model::{ModelId, ModelKind, ShareId, ShareOptions};
    use serde_json::json;

    fn create_test_model(id: &str, share_id: Option<&str>) -> Model {
        let model = Model::new(
            ModelId::new(id).unwrap(),
            format!("Test Model {}", id),
            ModelKind::Conceptual,
            json!({"nodes": [], "edges": []}),
        );

        match share_id {
            Some(share_id) => {
                model.with_share_options(ShareOptions::new(ShareId::new(share_id).unwrap()))
            }
            None => model,
        }
    }

    #[tokio::test]
    async fn test_find_one_by_share_id() {
        let repo = InMemoryModelRepository::with_models(vec![
            create_test_model("m1", Some("s1")),
            create_test_model("m2", Some("s2")),
            create_test_model("m3", None),
        ]);

        let found = repo.find_one(&ModelFilter::share_id("s2")).await.unwrap();
        assert_eq!(found.unwrap().id().as_str(), "m2");

        let missing = repo.find_one(&ModelFilter::share_id("m3")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_one_by_id() {
        let repo = InMemoryModelRepository::with_models(vec![create_test_model("m1", None)]);

        let found = repo
            .find_one(&ModelFilter::id(ModelId::new("m1").unwrap()))
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_create_and_update() {
        let repo = InMemoryModelRepository::new();

        repo.create(create_test_model("m1", None)).await.unwrap();
        assert!(matches!(
            repo.create(create_test_model("m1", None)).await,
            Err(DomainError::Conflict { .. })
        ));

        repo.update(create_test_model("m1", Some("s1"))).await.unwrap();
        let found = repo.find_one(&ModelFilter::share_id("s1")).await.unwrap();
        assert!(found.is_some());
        assert_eq!(repo.all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_share_id_rejected() {
        let repo = InMemoryModelRepository::with_models(vec![
            create_test_model("m1", Some("s1")),
            create_test_model("m2", None),
        ]);

        assert!(matches!(
            repo.update(create_test_model("m2", Some("s1"))).await,
            Err(DomainError::Conflict { .. })
        ));
        assert!(matches!(
            repo.create(create_test_model("m3", Some("s1"))).await,
            Err(DomainError::Conflict { .. })
        ));

        let found = repo.find_one(&ModelFilter::share_id("s1")).await.unwrap();
        assert_eq!(found.unwrap().id().as_str(), "m1");
    }

    #[tokio::test]
    async fn test_update_keeping_own_share_id() {
        let repo = InMemoryModelRepository::with_models(vec![create_test_model("m1", Some("s1"))]);

        assert!(repo.update(create_test_model("m1", Some("s1"))).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let repo = InMemoryModelRepository::new();

        let result = repo.update(create_test_model("missing", None)).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_mock_model_repository() {
        let mut mock = MockModelRepository::new();

        mock.expect_find_one().returning(|_| Ok(None));

        let result = mock.find_one(&ModelFilter::share_id("any")).await;
        assert!(result.unwrap().is_none());
    }
}
