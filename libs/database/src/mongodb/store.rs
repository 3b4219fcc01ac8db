//! MongoDB implementation of DocumentStore
//!
//! Each tenant sub-collection maps to one MongoDB collection named after its
//! logical path with `/` replaced by `.`, e.g. `workshop/acme/speakers` is
//! stored in `workshop.acme.speakers`. Document ids are ObjectId hex strings.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Client, Collection, Database,
    bson::{self, Bson, doc, oid::ObjectId},
};
use tracing::{info, instrument};

use super::{MongoConfig, connect_from_config};
use crate::common::{DatabaseError, DatabaseResult};
use crate::document::{Document, DocumentCollection, DocumentStore, StoredDocument, TenantPath};

/// Document store backed by a single MongoDB database
pub struct MongoDocumentStore {
    client: Client,
    db: Database,
    tenant: TenantPath,
    closed: AtomicBool,
}

impl MongoDocumentStore {
    /// Wrap an already connected client
    ///
    /// # Example
    /// ```ignore
    /// let client = connect("mongodb://localhost:27017").await?;
    /// let store = MongoDocumentStore::new(client, "default-project", TenantPath::new("workshop")?);
    /// ```
    pub fn new(client: Client, database: &str, tenant: TenantPath) -> Self {
        let db = client.database(database);
        Self {
            client,
            db,
            tenant,
            closed: AtomicBool::new(false),
        }
    }

    /// Resolve credentials, connect and scope the store to `tenant`
    pub async fn connect(config: &MongoConfig, tenant: TenantPath) -> DatabaseResult<Self> {
        let client = connect_from_config(config).await?;
        info!(database = %config.database, tenant = %tenant, "Document store ready");
        Ok(Self::new(client, &config.database, tenant))
    }

    /// Get the underlying database for advanced operations
    pub fn database(&self) -> &Database {
        &self.db
    }

    fn collection_name(&self, name: &str) -> String {
        self.tenant.collection_path(name).replace('/', ".")
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    fn tenant(&self) -> &TenantPath {
        &self.tenant
    }

    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection> {
        Arc::new(MongoDocumentCollection {
            collection: self.db.collection(&self.collection_name(name)),
            path: self.tenant.collection_path(name),
        })
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> DatabaseResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(DatabaseError::ConnectionFailed(
                "document store is closed".to_string(),
            ));
        }

        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }

    async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.client.clone().shutdown().await;
        info!("MongoDB connections closed");
    }
}

/// One tenant sub-collection
pub struct MongoDocumentCollection {
    collection: Collection<bson::Document>,
    path: String,
}

impl MongoDocumentCollection {
    fn object_id(id: &str) -> Option<ObjectId> {
        ObjectId::parse_str(id).ok()
    }

    fn not_found(&self, id: &str) -> DatabaseError {
        DatabaseError::not_found(&self.path, id)
    }
}

/// Convert a field mapping to BSON. Keys owned by the store are dropped.
fn to_bson_fields(mut fields: Document) -> DatabaseResult<bson::Document> {
    fields.remove("_id");
    fields.remove("id");
    bson::to_document(&fields).map_err(|e| DatabaseError::Codec(e.to_string()))
}

/// Convert a stored BSON document back to an id plus field mapping
fn from_bson_document(mut raw: bson::Document) -> DatabaseResult<StoredDocument> {
    let id = match raw.remove("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(s)) => s,
        Some(other) => other.to_string(),
        None => return Err(DatabaseError::Codec("document without _id".to_string())),
    };

    match Bson::Document(raw).into_relaxed_extjson() {
        serde_json::Value::Object(fields) => Ok(StoredDocument::new(id, fields)),
        other => Err(DatabaseError::Codec(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

#[async_trait]
impl DocumentCollection for MongoDocumentCollection {
    #[instrument(skip(self), fields(collection = %self.path))]
    async fn list(&self) -> DatabaseResult<Vec<StoredDocument>> {
        let cursor = self.collection.find(doc! {}).await?;
        let raw: Vec<bson::Document> = cursor.try_collect().await?;
        raw.into_iter().map(from_bson_document).collect()
    }

    #[instrument(skip(self), fields(collection = %self.path))]
    async fn get(&self, id: &str) -> DatabaseResult<Option<StoredDocument>> {
        let Some(oid) = Self::object_id(id) else {
            return Ok(None);
        };

        match self.collection.find_one(doc! { "_id": oid }).await? {
            Some(raw) => Ok(Some(from_bson_document(raw)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, fields), fields(collection = %self.path))]
    async fn add(&self, fields: Document) -> DatabaseResult<String> {
        let mut document = to_bson_fields(fields)?;
        let oid = ObjectId::new();
        document.insert("_id", oid);

        self.collection.insert_one(document).await?;

        let id = oid.to_hex();
        info!(document_id = %id, "Document added");
        Ok(id)
    }

    #[instrument(skip(self, patch), fields(collection = %self.path))]
    async fn update(&self, id: &str, patch: Document) -> DatabaseResult<()> {
        let oid = Self::object_id(id).ok_or_else(|| self.not_found(id))?;
        let set = to_bson_fields(patch)?;

        let result = self
            .collection
            .update_one(doc! { "_id": oid }, doc! { "$set": set })
            .await?;

        if result.matched_count == 0 {
            return Err(self.not_found(id));
        }

        info!(document_id = %id, "Document updated");
        Ok(())
    }

    #[instrument(skip(self), fields(collection = %self.path))]
    async fn delete(&self, id: &str) -> DatabaseResult<()> {
        let oid = Self::object_id(id).ok_or_else(|| self.not_found(id))?;
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;

        if result.deleted_count == 0 {
            return Err(self.not_found(id));
        }

        info!(document_id = %id, "Document deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(collection = %self.path))]
    async fn count(&self) -> DatabaseResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }
}
