//! Shared model service - resolve, manage and import model shares

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    validate_model_name, DomainError, Model, ModelFilter, ModelId, ModelRepository,
    ModelValidationError, ShareId, ShareOptions, SharedModelView,
};

/// Requested share state for a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareSettings {
    pub active: bool,
    pub import_allowed: bool,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            active: true,
            import_allowed: false,
        }
    }
}

/// Service exposing models through share links
#[derive(Debug)]
pub struct SharedModelService<R: ModelRepository> {
    repository: Arc<R>,
}

impl<R: ModelRepository> SharedModelService<R> {
    /// Create a new SharedModelService backed by the given repository
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Look up a model by share ID and return its public view.
    ///
    /// Repository failures are returned unchanged. A missing record, missing share
    /// descriptor or inactive share yields `DomainError::Unauthorized`.
    pub async fn find_shared_model(&self, shared_id: &str) -> Result<SharedModelView, DomainError> {
        let filter = ModelFilter::share_id(shared_id);
        debug!(share_id = %shared_id, filter = %filter, "Resolving shared model");

        let model = self.repository.find_one(&filter).await?;

        match SharedModelView::from_lookup(model.as_ref()) {
            Ok(view) => {
                debug!(share_id = %shared_id, import_allowed = view.import_allowed, "Shared model resolved");
                Ok(view)
            }
            Err(e) => {
                debug!(share_id = %shared_id, found = model.is_some(), "Share rejected");
                Err(e)
            }
        }
    }

    /// Enable or update sharing for a model.
    ///
    /// The first share generates a share ID; later calls keep it so existing links stay valid.
    pub async fn share_model(
        &self,
        model_id: &str,
        settings: ShareSettings,
    ) -> Result<ShareOptions, DomainError> {
        let mut model = self.get_required(model_id).await?;

        let share_id = model
            .share_options()
            .map(|share| share.id.clone())
            .unwrap_or_else(ShareId::generate);

        let share = ShareOptions::new(share_id)
            .with_active(settings.active)
            .with_import_allowed(settings.import_allowed);

        model.set_share_options(Some(share.clone()));
        self.repository.update(model).await?;

        info!(
            model_id = %model_id,
            share_id = %share.id,
            active = share.active,
            import_allowed = share.import_allowed,
            "Model share updated"
        );

        Ok(share)
    }

    /// Deactivate a model's share, keeping its share ID
    pub async fn revoke_share(&self, model_id: &str) -> Result<(), DomainError> {
        let mut model = self.get_required(model_id).await?;

        let Some(share) = model.share_options().cloned() else {
            debug!(model_id = %model_id, "Model is not shared, nothing to revoke");
            return Ok(());
        };

        model.set_share_options(Some(share.with_active(false)));
        self.repository.update(model).await?;

        info!(model_id = %model_id, "Model share revoked");
        Ok(())
    }

    /// Copy a shared model into the given owner's workspace.
    ///
    /// Fails with `Unauthorized` unless the share is active and allows importing.
    pub async fn import_shared_model(
        &self,
        shared_id: &str,
        owner: &str,
    ) -> Result<Model, DomainError> {
        if owner.trim().is_empty() {
            return Err(DomainError::validation("Owner cannot be empty"));
        }

        let view = self.find_shared_model(shared_id).await?;

        if !view.import_allowed {
            debug!(share_id = %shared_id, "Share does not allow importing");
            return Err(DomainError::Unauthorized);
        }

        validate_model_name(&view.name).map_err(validation_error_to_domain)?;

        let model = Model::new(ModelId::generate(), view.name, view.kind, view.model)
            .with_owner(owner);
        let created = self.repository.create(model).await?;

        info!(
            share_id = %shared_id,
            model_id = %created.id(),
            owner = %owner,
            "Shared model imported"
        );

        Ok(created)
    }

    async fn get_required(&self, model_id: &str) -> Result<Model, DomainError> {
        let id = ModelId::new(model_id).map_err(validation_error_to_domain)?;

        self.repository
            .find_one(&ModelFilter::id(id))
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Model '{}' not found", model_id)))
    }
}

fn validation_error_to_domain(error: ModelValidationError) -> DomainError {
    DomainError::validation(error.to_string())
}
