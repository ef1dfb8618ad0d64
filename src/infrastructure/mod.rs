//! Infrastructure layer - Repository implementations, services and logging

pub mod logging;
pub mod model;
pub mod services;
