//! Domain layer - Core entities, share rules and repository contracts

pub mod error;
pub mod model;

pub use error::DomainError;
pub use model::{
    ensure_unique_share_id, validate_model_id, validate_model_name, validate_share_id,
    InMemoryModelRepository, Model, ModelFilter, ModelId, ModelKind, ModelRepository,
    ModelValidationError, ShareId, ShareOptions, SharedModelView,
};

#[cfg(test)]
pub use model::MockModelRepository;
