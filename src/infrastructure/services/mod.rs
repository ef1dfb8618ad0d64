//! Infrastructure services

mod shared_model_service;

pub use shared_model_service::{ShareSettings, SharedModelService};
