//! Model repository implementations

mod file_repository;

pub use file_repository::JsonFileModelRepository;
