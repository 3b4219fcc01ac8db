//! Entity service - validation in front of the repository

use std::sync::Arc;

use tracing::instrument;
use validator::Validate;

use crate::entity::Entity;
use crate::error::WorkshopResult;
use crate::repository::DocumentRepository;

/// Business logic for one entity type.
///
/// Inputs are validated here, before anything reaches the store.
pub struct EntityService<E: Entity> {
    repository: Arc<DocumentRepository<E>>,
}

impl<E: Entity> EntityService<E> {
    pub fn new(repository: DocumentRepository<E>) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self), fields(collection = E::COLLECTION))]
    pub async fn list(&self) -> WorkshopResult<Vec<E>> {
        self.repository.list().await
    }

    #[instrument(skip(self, draft), fields(collection = E::COLLECTION))]
    pub async fn create(&self, draft: E::Draft) -> WorkshopResult<E> {
        draft.validate()?;
        self.repository.create(draft).await
    }

    #[instrument(skip(self, patch), fields(collection = E::COLLECTION))]
    pub async fn update(&self, id: &str, patch: E::Patch) -> WorkshopResult<E> {
        patch.validate()?;
        self.repository.update(id, patch).await
    }

    #[instrument(skip(self), fields(collection = E::COLLECTION))]
    pub async fn delete(&self, id: &str) -> WorkshopResult<()> {
        self.repository.delete(id).await
    }

    #[instrument(skip(self), fields(collection = E::COLLECTION))]
    pub async fn count(&self) -> WorkshopResult<u64> {
        self.repository.count().await
    }
}

impl<E: Entity> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
