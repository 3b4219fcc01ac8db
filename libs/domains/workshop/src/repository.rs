//! Generic repository over one tenant sub-collection

use std::marker::PhantomData;
use std::sync::Arc;

use database::{DocumentCollection, DocumentStore};
use tracing::{info, instrument};

use crate::entity::Entity;
use crate::error::{WorkshopError, WorkshopResult};
use crate::presence::ResolvePatch;

/// CRUD access to the `workshop/{tenant}/{E::COLLECTION}` sub-collection.
///
/// Every operation is a single store round trip, except `update` which reads
/// the document back after writing it. Drafts and patches are expected to be
/// validated by the caller.
pub struct DocumentRepository<E: Entity> {
    collection: Arc<dyn DocumentCollection>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> DocumentRepository<E> {
    pub fn new(collection: Arc<dyn DocumentCollection>) -> Self {
        Self {
            collection,
            _entity: PhantomData,
        }
    }

    /// Repository over the entity's collection in the store's tenant scope
    pub fn from_store(store: &dyn DocumentStore) -> Self {
        Self::new(store.collection(E::COLLECTION))
    }

    fn store_error(err: database::DatabaseError) -> WorkshopError {
        WorkshopError::from_store(E::KIND, err)
    }

    /// Full unordered scan. A document that fails to decode fails the whole call.
    #[instrument(skip(self), fields(collection = E::COLLECTION))]
    pub async fn list(&self) -> WorkshopResult<Vec<E>> {
        let documents = self.collection.list().await.map_err(Self::store_error)?;
        documents.into_iter().map(E::from_document).collect()
    }

    #[instrument(skip(self), fields(collection = E::COLLECTION))]
    pub async fn get(&self, id: &str) -> WorkshopResult<E> {
        match self.collection.get(id).await.map_err(Self::store_error)? {
            Some(stored) => E::from_document(stored),
            None => Err(WorkshopError::not_found(E::KIND, id)),
        }
    }

    /// Persist a new entity and return it with its store-assigned id.
    #[instrument(skip(self, draft), fields(collection = E::COLLECTION))]
    pub async fn create(&self, draft: E::Draft) -> WorkshopResult<E> {
        let mut entity = E::from_draft(draft);
        let id = self
            .collection
            .add(entity.to_document()?)
            .await
            .map_err(Self::store_error)?;

        info!(entity_id = %id, "{} created", E::KIND);
        entity.set_id(id);
        Ok(entity)
    }

    /// Apply the provided fields of `patch` and return the entity as stored.
    #[instrument(skip(self, patch), fields(collection = E::COLLECTION))]
    pub async fn update(&self, id: &str, patch: E::Patch) -> WorkshopResult<E> {
        let fields = patch.resolve()?;
        self.collection
            .update(id, fields)
            .await
            .map_err(Self::store_error)?;

        info!(entity_id = %id, "{} updated", E::KIND);
        self.get(id).await
    }

    /// Remove the document. References to it held elsewhere are left as-is.
    #[instrument(skip(self), fields(collection = E::COLLECTION))]
    pub async fn delete(&self, id: &str) -> WorkshopResult<()> {
        self.collection.delete(id).await.map_err(Self::store_error)?;
        info!(entity_id = %id, "{} deleted", E::KIND);
        Ok(())
    }

    #[instrument(skip(self), fields(collection = E::COLLECTION))]
    pub async fn count(&self) -> WorkshopResult<u64> {
        self.collection.count().await.map_err(Self::store_error)
    }
}

impl<E: Entity> Clone for DocumentRepository<E> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.collection))
    }
}
