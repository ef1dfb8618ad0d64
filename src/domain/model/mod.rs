//! Model domain - diagram models and their share descriptors

mod entity;
mod filter;
mod repository;
mod shared;
mod validation;

pub use entity::{Model, ModelId, ModelKind, ShareId, ShareOptions};
pub use filter::ModelFilter;
pub use repository::{
    ensure_unique_share_id, in_memory::InMemoryModelRepository, ModelRepository,
};
pub use shared::SharedModelView;
pub use validation::{
    validate_model_id, validate_model_name, validate_share_id, ModelValidationError,
    MAX_ID_LENGTH, MAX_NAME_LENGTH,
};

#[cfg(test)]
pub use repository::MockModelRepository;
