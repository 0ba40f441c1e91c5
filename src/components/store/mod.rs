#[path = "entity.rs"]
pub mod entity;

#[path = "error.rs"]
pub mod error;

#[path = "file_store.rs"]
pub mod file_store;
