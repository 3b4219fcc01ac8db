//! Mapping between typed entities and stored documents

use database::{Document, StoredDocument};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::error::{WorkshopError, WorkshopResult};
use crate::presence::ResolvePatch;

/// A record kept in one sub-collection of the tenant path.
///
/// The `id` is the document key: it is stripped from the body on write and
/// re-attached from the key on read.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Sub-collection name, e.g. `speakers`
    const COLLECTION: &'static str;
    /// Singular name used in messages, e.g. `Speaker`
    const KIND: &'static str;

    /// Create payload
    type Draft: Validate + Send + Sync;
    /// Sparse update payload
    type Patch: Validate + ResolvePatch + Send + Sync;

    /// Build the unsaved entity, setting server-owned fields.
    fn from_draft(draft: Self::Draft) -> Self;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Document body to store (no `id`)
    fn to_document(&self) -> WorkshopResult<Document> {
        match serde_json::to_value(self) {
            Ok(Value::Object(mut fields)) => {
                fields.remove("id");
                Ok(fields)
            }
            Ok(other) => Err(WorkshopError::Store(format!(
                "{} serialized to a non-object: {}",
                Self::KIND,
                other
            ))),
            Err(e) => Err(WorkshopError::Store(e.to_string())),
        }
    }

    /// Rebuild the entity from a stored document and its key
    fn from_document(stored: StoredDocument) -> WorkshopResult<Self> {
        let StoredDocument { id, mut fields } = stored;
        fields.insert("id".to_string(), Value::String(id.clone()));

        serde_json::from_value(Value::Object(fields)).map_err(|e| {
            WorkshopError::Store(format!("failed to decode {} {}: {}", Self::KIND, id, e))
        })
    }
}
