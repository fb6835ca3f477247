//! Service trait definitions for dependency injection
//!
//! Persistence is abstracted behind `EntityStore` so the repository and the
//! HTTP layer never see which backend was selected at startup.

use async_trait::async_trait;
use shared::{Collection, Document};

use crate::error::WebServerResult;

/// Document-level record storage
///
/// Each call is atomic for the record it touches. Implementations keep
/// insertion order in `list` so reports that break ties by position are
/// deterministic.
#[mockall::automock]
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Human-readable backend name for health reporting
    fn backend_name(&self) -> &'static str;

    /// Insert a new record and return it with a freshly assigned `id`
    async fn create(&self, collection: Collection, fields: Document) -> WebServerResult<Document>;

    /// Fetch one record by id
    async fn get(&self, collection: Collection, id: &str) -> WebServerResult<Option<Document>>;

    /// Fetch every record in the collection
    async fn list(&self, collection: Collection) -> WebServerResult<Vec<Document>>;

    /// Fetch records whose string `field` equals `value`
    async fn list_by(&self, collection: Collection, field: &str, value: &str) -> WebServerResult<Vec<Document>>;

    /// Shallow-merge `partial` into the record; `None` when the id is unknown
    async fn update(&self, collection: Collection, id: &str, partial: Document) -> WebServerResult<Option<Document>>;

    /// Remove the record; `false` when the id is unknown
    async fn delete(&self, collection: Collection, id: &str) -> WebServerResult<bool>;
}
