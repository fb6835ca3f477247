//! Persistent entity store backed by JSON files
//!
//! Each collection lives in `<data_dir>/<collection>.json` as an array of
//! documents. The whole directory is loaded at open; every mutation is
//! written through with write-to-temp plus rename, and the in-memory copy is
//! only replaced once the file write has succeeded.

use async_trait::async_trait;
use shared::{Collection, Document, component_debug, component_info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

use super::documents::{field_equals, has_id, merge, record_id, with_new_id};
use crate::error::{WebServerError, WebServerResult};
use crate::traits::EntityStore;

const WRITE_CHECK_FILE: &str = ".write-check";

/// JSON-file document store
#[derive(Debug)]
pub struct DocumentStore {
    data_dir: PathBuf,
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl DocumentStore {
    /// Open (creating if needed) the data directory and load every collection
    pub async fn open(data_dir: impl Into<PathBuf>) -> WebServerResult<Self> {
        let data_dir = data_dir.into();

        fs::create_dir_all(&data_dir).await.map_err(|e| {
            WebServerError::store(format!("cannot create data directory {}: {e}", data_dir.display()))
        })?;
        Self::check_writable(&data_dir).await?;

        let mut collections = HashMap::new();
        for collection in Collection::ALL {
            let records = Self::load_collection(&data_dir, collection).await?;
            collections.insert(collection, records);
        }

        let total: usize = collections.values().map(Vec::len).sum();
        component_info!(
            shared::Component::Store,
            "📂 Opened document store at {} ({} records)",
            data_dir.display(),
            total
        );

        Ok(Self {
            data_dir,
            collections: RwLock::new(collections),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn collection_path(data_dir: &Path, collection: Collection) -> PathBuf {
        data_dir.join(format!("{}.json", collection.as_str()))
    }

    async fn check_writable(data_dir: &Path) -> WebServerResult<()> {
        let marker = data_dir.join(WRITE_CHECK_FILE);
        fs::write(&marker, b"ok")
            .await
            .map_err(|e| WebServerError::store(format!("data directory {} is not writable: {e}", data_dir.display())))?;
        if let Err(e) = fs::remove_file(&marker).await {
            component_debug!(
                shared::Component::Store,
                path = %marker.display(),
                error = %e,
                "Left write check file behind"
            );
        }
        Ok(())
    }

    async fn load_collection(data_dir: &Path, collection: Collection) -> WebServerResult<Vec<Document>> {
        let path = Self::collection_path(data_dir, collection);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let bytes = fs::read(&path)
            .await
            .map_err(|e| WebServerError::store(format!("cannot read {}: {e}", path.display())))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| WebServerError::store(format!("corrupt collection file {}: {e}", path.display())))
    }

    /// Write the collection to a temp file, then rename it over the old one
    async fn persist(&self, collection: Collection, records: &[Document]) -> WebServerResult<()> {
        let path = Self::collection_path(&self.data_dir, collection);
        let tmp_path = path.with_extension("json.tmp");

        let content = serde_json::to_vec_pretty(records)
            .map_err(|e| WebServerError::store(format!("cannot encode {}: {e}", path.display())))?;
        fs::write(&tmp_path, content)
            .await
            .map_err(|e| WebServerError::store(format!("cannot write {}: {e}", tmp_path.display())))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| WebServerError::store(format!("cannot replace {}: {e}", path.display())))?;

        component_debug!(
            shared::Component::Store,
            collection = %collection,
            records = records.len(),
            "💾 Persisted collection"
        );
        Ok(())
    }
}

#[async_trait]
impl EntityStore for DocumentStore {
    fn backend_name(&self) -> &'static str {
        "document"
    }

    async fn create(&self, collection: Collection, fields: Document) -> WebServerResult<Document> {
        let record = with_new_id(fields);
        let mut collections = self.collections.write().await;

        let mut records = collections.get(&collection).cloned().unwrap_or_default();
        records.push(record.clone());
        self.persist(collection, &records).await?;
        collections.insert(collection, records);

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

        let mut records = collections.get(&collection).cloned().unwrap_or_default();
        let Some(record) = records.iter_mut().find(|record| has_id(record, id)) else {
            return Ok(None);
        };
        merge(record, partial);
        let updated = record.clone();

        self.persist(collection, &records).await?;
        collections.insert(collection, records);
        Ok(Some(updated))
    }

    async fn delete(&self, collection: Collection, id: &str) -> WebServerResult<bool> {
        let mut collections = self.collections.write().await;

        let mut records = collections.get(&collection).cloned().unwrap_or_default();
        let before = records.len();
        records.retain(|record| !has_id(record, id));
        if records.len() == before {
            return Ok(false);
        }

        self.persist(collection, &records).await?;
        collections.insert(collection, records);
        Ok(true)
    }
}
