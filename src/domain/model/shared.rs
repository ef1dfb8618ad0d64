//! Public projection of a shared model

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Model, ModelKind};
use crate::domain::DomainError;

/// Sanitized view returned to share-link viewers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedModelView {
    /// The share identifier, never the model's own ID
    pub id: String,
    pub model: Value,
    #[serde(rename = "type")]
    pub kind: ModelKind,
    pub name: String,
    pub import_allowed: bool,
}

impl SharedModelView {
    /// Decide whether a looked-up record may be exposed and project it.
    ///
    /// Only a present model whose share descriptor is present and active yields a view;
    /// every other case is `Unauthorized`.
    pub fn from_lookup(model: Option<&Model>) -> Result<Self, DomainError> {
        let model = model.ok_or(DomainError::Unauthorized)?;
        let share = model.share_options().ok_or(DomainError::Unauthorized)?;

        if !share.active {
            return Err(DomainError::Unauthorized);
        }

        Ok(Self {
            id: share.id.to_string(),
            model: model.content().clone(),
            kind: model.kind().clone(),
            name: model.name().to_string(),
            import_allowed: share.import_allowed,
        })
    }
}
