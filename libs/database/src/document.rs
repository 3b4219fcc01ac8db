//! Store-agnostic document interface
//!
//! Documents are plain JSON field mappings. The document key (`id`) is owned
//! by the store: it is returned by [`DocumentCollection::add`] and carried next
//! to the fields in [`StoredDocument`], never inside them.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::common::{DatabaseError, DatabaseResult};

/// Top-level collection every tenant document lives under.
pub const ROOT_COLLECTION: &str = "workshop";

/// Field mapping of a single document.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// A document read back from the store together with its store-assigned key.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub fields: Document,
}

impl StoredDocument {
    pub fn new(id: impl Into<String>, fields: Document) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// The fixed tenant scope: `workshop/{tenant_id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantPath {
    tenant_id: String,
}

impl TenantPath {
    /// Build a tenant path. The id must be non-empty and must not contain
    /// path (`/`) or namespace (`.`) separators.
    pub fn new(tenant_id: impl Into<String>) -> DatabaseResult<Self> {
        let tenant_id = tenant_id.into();
        let tenant_id = tenant_id.trim();

        if tenant_id.is_empty() {
            return Err(DatabaseError::ConfigError(
                "tenant id must not be empty".to_string(),
            ));
        }
        if tenant_id.contains(['/', '.', '$']) {
            return Err(DatabaseError::ConfigError(format!(
                "tenant id '{}' must not contain '/', '.' or '$'",
                tenant_id
            )));
        }

        Ok(Self {
            tenant_id: tenant_id.to_string(),
        })
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// Logical path of a sub-collection, e.g. `workshop/acme/speakers`.
    pub fn collection_path(&self, name: &str) -> String {
        format!("{}/{}", self, name)
    }
}

impl fmt::Display for TenantPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", ROOT_COLLECTION, self.tenant_id)
    }
}

/// Handle to one sub-collection of the tenant path.
///
/// Every method is a single store round trip. Implementations must not retry
/// or cache.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Full unordered scan. A fault part-way through fails the whole call.
    async fn list(&self) -> DatabaseResult<Vec<StoredDocument>>;

    /// Fetch one document; `Ok(None)` when the id does not resolve.
    async fn get(&self, id: &str) -> DatabaseResult<Option<StoredDocument>>;

    /// Insert a document and return the id the store assigned to it.
    async fn add(&self, fields: Document) -> DatabaseResult<String>;

    /// Merge `patch` into an existing document.
    ///
    /// Fails with [`DatabaseError::DocumentNotFound`] if the id does not resolve.
    async fn update(&self, id: &str, patch: Document) -> DatabaseResult<()>;

    /// Remove a document.
    ///
    /// Fails with [`DatabaseError::DocumentNotFound`] if the id does not resolve.
    async fn delete(&self, id: &str) -> DatabaseResult<()>;

    /// Number of documents in the collection.
    async fn count(&self) -> DatabaseResult<u64>;
}

/// Connection to the document store, scoped to one tenant.
///
/// The handle is immutable once built and is shared across request tasks.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// The tenant scope every collection handle is rooted at.
    fn tenant(&self) -> &TenantPath;

    /// Handle to `workshop/{tenant}/{name}`.
    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection>;

    /// Lightweight reachability check.
    async fn ping(&self) -> DatabaseResult<()>;

    /// Release underlying connections. Calling this more than once is a no-op.
    async fn close(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_path_formats_collection_paths() {
        let tenant = TenantPath::new("acme").unwrap();
        assert_eq!(tenant.to_string(), "workshop/acme");
        assert_eq!(tenant.collection_path("sessions"), "workshop/acme/sessions");
    }

    #[test]
    fn test_tenant_path_trims_whitespace() {
        let tenant = TenantPath::new("  acme ").unwrap();
        assert_eq!(tenant.tenant_id(), "acme");
    }

    #[test]
    fn test_tenant_path_rejects_separators() {
        assert!(TenantPath::new("").is_err());
        assert!(TenantPath::new("a/b").is_err());
        assert!(TenantPath::new("a.b").is_err());
    }
}
