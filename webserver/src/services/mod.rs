//! Service implementations
//!
//! Store backends, backend selection, the typed repository and demo seeding

pub mod backend;
pub mod document_store;
pub mod documents;
pub mod memory_store;
pub mod repository;
pub mod seed;

#[cfg(test)]
mod tests;

// Re-export service implementations
pub use backend::open_store;
pub use document_store::DocumentStore;
pub use memory_store::MemoryStore;
pub use repository::Repository;
pub use seed::seed_demo_data;
