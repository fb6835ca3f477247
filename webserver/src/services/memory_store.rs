//! In-memory entity store
//!
//! Used when no data directory is configured or the persistent store cannot
//! be opened. Contents are lost on restart.

use async_trait::async_trait;
use shared::{Collection, Document, component_debug};
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::documents::{field_equals, has_id, merge, record_id, with_new_id};
use crate::error::WebServerResult;
use crate::traits::EntityStore;

/// Collections held as insertion-ordered vectors behind one lock
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, collection: Collection, fields: Document) -> WebServerResult<Document> {
        let record = with_new_id(fields);
        let mut collections = self.collections.write().await;
        collections.entry(collection).or_default().push(record.clone());
        component_debug!(
            shared::Component::Store,
            collection = %collection,
            id = record_id(&record).unwrap_or_default(),
            "Created record"
        );
        Ok(record)
    }

    async fn get(&self, collection: Collection, id: &str) -> WebServerResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|records| records.iter().find(|record| has_id(record, id)))
            .cloned())
    }

    async fn list(&self, collection: Collection) -> WebServerResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    async fn list_by(&self, collection: Collection, field: &str, value: &str) -> WebServerResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| field_equals(record, field, value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update(&self, collection: Collection, id: &str, partial: Document) -> WebServerResult<Option<Document>> {
        let mut collections = self.collections.write().await;
        let Some(record) = collections
            .get_mut(&collection)
            .and_then(|records| records.iter_mut().find(|record| has_id(record, id)))
        else {
            return Ok(None);
        };
        merge(record, partial);
        Ok(Some(record.clone()))
    }

    async fn delete(&self, collection: Collection, id: &str) -> WebServerResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(records) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        let before = records.len();
        records.retain(|record| !has_id(record, id));
        Ok(records.len() != before)
    }
}
