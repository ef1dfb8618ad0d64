//! Model Share
//!
//! Resolves diagram models exposed through share links:
//! - Public projection of a model by share identifier, gated on an active share
//! - Share management (enable, update, revoke) that keeps share links stable
//! - Importing shared models into another owner's workspace

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{DomainError, Model, ModelRepository, SharedModelView};
pub use infrastructure::services::{ShareSettings, SharedModelService};
