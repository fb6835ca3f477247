//! Tests for the in-memory store

use super::fixtures::team_fields;
use super::helpers::exercise_store_contract;
use crate::services::MemoryStore;
use crate::traits::EntityStore;
use shared::Collection;

#[tokio::test]
async fn test_memory_store_contract() {
    let store = MemoryStore::new();
    exercise_store_contract(&store).await;
    assert_eq!(store.backend_name(), "memory");
}

#[tokio::test]
async fn test_collections_are_isolated() {
    let store = MemoryStore::new();
    store.create(Collection::Teams, team_fields("Alpha")).await.unwrap();
    assert!(store.list(Collection::Judges).await.unwrap().is_empty());
    assert!(!store.delete(Collection::Judges, "anything").await.unwrap());
}

#[tokio::test]
async fn test_ids_are_unique() {
    let store = MemoryStore::new();
    let a = store.create(Collection::Teams, team_fields("A")).await.unwrap();
    let b = store.create(Collection::Teams, team_fields("A")).await.unwrap();
    assert_ne!(a["id"], b["id"]);
}

#[tokio::test]
async fn test_concurrent_creates_are_all_kept() {
    let store = std::sync::Arc::new(MemoryStore::new());
    let mut handles = Vec::new();
    for i in 0..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.create(Collection::Teams, team_fields(&format!("Team {i}"))).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(store.list(Collection::Teams).await.unwrap().len(), 20);
}
