//! In-memory document store
//!
//! Implements the same contract as the MongoDB gateway: store-assigned ids,
//! merge updates, NotFound on update/delete of an absent id. The store can be
//! switched offline to simulate an unreachable backend.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use database::{
    DatabaseError, DatabaseResult, Document, DocumentCollection, DocumentStore, StoredDocument,
    TenantPath,
};
use tokio::sync::RwLock;
use uuid::Uuid;

type Collections = HashMap<String, BTreeMap<String, Document>>;

/// Document store that keeps everything in process memory
///
/// Clones share the same data, so a test can keep a handle for seeding and
/// inspection while the code under test owns another.
///
/// # Example
///
/// ```
/// use database::DocumentStore;
/// use test_utils::MemoryDocumentStore;
///
/// # async fn example() {
/// let store = MemoryDocumentStore::new("workshop");
/// let speakers = store.collection("speakers");
/// let id = speakers.add(serde_json::Map::new()).await.unwrap();
/// assert!(speakers.get(&id).await.unwrap().is_some());
/// # }
/// ```
#[derive(Clone)]
pub struct MemoryDocumentStore {
    tenant: TenantPath,
    data: Arc<RwLock<Collections>>,
    offline: Arc<AtomicBool>,
}

impl MemoryDocumentStore {
    /// Create an empty store scoped to `tenant_id`
    ///
    /// # Panics
    ///
    /// Panics if `tenant_id` is not a valid tenant path segment.
    pub fn new(tenant_id: &str) -> Self {
        let tenant = TenantPath::new(tenant_id)
            .unwrap_or_else(|e| panic!("invalid test tenant '{}': {}", tenant_id, e));
        Self {
            tenant,
            data: Arc::new(RwLock::new(HashMap::new())),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent operation fail with a connection error
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Seed a document under a caller-chosen id
    pub async fn insert_with_id(&self, collection: &str, id: &str, fields: Document) {
        let path = self.tenant.collection_path(collection);
        self.data
            .write()
            .await
            .entry(path)
            .or_default()
            .insert(id.to_string(), fields);
    }

    /// Snapshot of a collection's raw documents
    pub async fn documents(&self, collection: &str) -> BTreeMap<String, Document> {
        let path = self.tenant.collection_path(collection);
        self.data
            .read()
            .await
            .get(&path)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn tenant(&self) -> &TenantPath {
        &self.tenant
    }

    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection> {
        Arc::new(MemoryCollection {
            path: self.tenant.collection_path(name),
            data: Arc::clone(&self.data),
            offline: Arc::clone(&self.offline),
        })
    }

    async fn ping(&self) -> DatabaseResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }

    async fn close(&self) {
        tracing::debug!(tenant = %self.tenant, "Closing in-memory document store");
    }
}

struct MemoryCollection {
    path: String,
    data: Arc<RwLock<Collections>>,
    offline: Arc<AtomicBool>,
}

fn unavailable() -> DatabaseError {
    DatabaseError::ConnectionFailed("in-memory store is offline".to_string())
}

impl MemoryCollection {
    fn check_online(&self) -> DatabaseResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    async fn list(&self) -> DatabaseResult<Vec<StoredDocument>> {
        self.check_online()?;
        let data = self.data.read().await;
        Ok(data
            .get(&self.path)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| StoredDocument::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get(&self, id: &str) -> DatabaseResult<Option<StoredDocument>> {
        self.check_online()?;
        let data = self.data.read().await;
        Ok(data
            .get(&self.path)
            .and_then(|docs| docs.get(id))
            .map(|fields| StoredDocument::new(id, fields.clone())))
    }

    async fn add(&self, mut fields: Document) -> DatabaseResult<String> {
        self.check_online()?;
        fields.remove("id");
        let id = Uuid::new_v4().simple().to_string();
        self.data
            .write()
            .await
            .entry(self.path.clone())
            .or_default()
            .insert(id.clone(), fields);
        Ok(id)
    }

    async fn update(&self, id: &str, mut patch: Document) -> DatabaseResult<()> {
        self.check_online()?;
        patch.remove("id");
        let mut data = self.data.write().await;
        let existing = data
            .get_mut(&self.path)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| DatabaseError::not_found(&self.path, id))?;
        existing.extend(patch);
        Ok(())
    }

    async fn delete(&self, id: &str) -> DatabaseResult<()> {
        self.check_online()?;
        let mut data = self.data.write().await;
        data.get_mut(&self.path)
            .and_then(|docs| docs.remove(id))
            .map(|_| ())
            .ok_or_else(|| DatabaseError::not_found(&self.path, id))
    }

    async fn count(&self) -> DatabaseResult<u64> {
        self.check_online()?;
        let data = self.data.read().await;
        Ok(data.get(&self.path).map_or(0, |docs| docs.len() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_add_get_and_count() {
        let store = MemoryDocumentStore::new("acme");
        let speakers = store.collection("speakers");

        let id = speakers.add(fields(json!({"name": "Ada"}))).await.unwrap();
        let stored = speakers.get(&id).await.unwrap().unwrap();

        assert_eq!(stored.fields["name"], "Ada");
        assert_eq!(speakers.count().await.unwrap(), 1);
        assert!(store.collection("sessions").list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryDocumentStore::new("acme");
        let speakers = store.collection("speakers");
        let id = speakers
            .add(fields(json!({"name": "Ada", "company": "Engines"})))
            .await
            .unwrap();

        speakers
            .update(&id, fields(json!({"company": "Analytical"})))
            .await
            .unwrap();

        let stored = speakers.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.fields["name"], "Ada");
        assert_eq!(stored.fields["company"], "Analytical");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_are_not_found() {
        let store = MemoryDocumentStore::new("acme");
        let speakers = store.collection("speakers");

        let err = speakers.update("missing", Document::new()).await.unwrap_err();
        assert!(matches!(err, DatabaseError::DocumentNotFound { .. }));

        let err = speakers.delete("missing").await.unwrap_err();
        assert!(matches!(err, DatabaseError::DocumentNotFound { .. }));
    }

    #[tokio::test]
    async fn test_tenants_are_isolated() {
        let store = MemoryDocumentStore::new("acme");
        store
            .insert_with_id("speakers", "s1", fields(json!({"name": "Ada"})))
            .await;

        assert_eq!(store.documents("speakers").await.len(), 1);
        assert!(store.documents("attendees").await.is_empty());
    }

    #[tokio::test]
    async fn test_offline_store_fails_with_connection_error() {
        let store = MemoryDocumentStore::new("acme");
        store.set_offline(true);

        assert!(store.ping().await.unwrap_err().is_connection());
        let err = store.collection("speakers").list().await.unwrap_err();
        assert!(err.is_connection());

        store.set_offline(false);
        assert!(store.ping().await.is_ok());
    }
}
