//! Store backend selection at process start

use shared::{component_info, component_warn};
use std::path::Path;
use std::sync::Arc;

use super::{DocumentStore, MemoryStore};
use crate::traits::EntityStore;

/// Pick the persistent store when a data directory is configured
///
/// Any failure opening it is logged and the in-memory store is used instead,
/// so the server always comes up.
pub async fn open_store(data_dir: Option<&Path>) -> Arc<dyn EntityStore> {
    let Some(dir) = data_dir else {
        component_info!(shared::Component::Store, "🧠 No data directory configured, using in-memory store");
        return Arc::new(MemoryStore::new());
    };

    match DocumentStore::open(dir).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            component_warn!(
                shared::Component::Store,
                error = %e,
                "⚠️ Falling back to in-memory store; {} could not be opened",
                dir.display()
            );
            Arc::new(MemoryStore::new())
        }
    }
}
