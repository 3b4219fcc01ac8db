//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that creates a MongoDB container for testing.

use database::TenantPath;
use database::mongodb::{MongoConfig, MongoDocumentStore};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is automatically stopped and removed when this struct is dropped.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestMongo;
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// let store = mongo.store("acme").await;
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    pub connection_string: String,
}

impl TestMongo {
    /// Create a new test MongoDB instance
    pub async fn new() -> Self {
        let container = Mongo::default()
            .with_tag("8")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}", host_port);

        tracing::info!(port = host_port, "Test MongoDB ready");

        Self {
            container,
            connection_string,
        }
    }

    /// Config pointing at the container with a throwaway database
    pub fn config(&self) -> MongoConfig {
        MongoConfig::with_database(self.connection_string.clone(), "workshop-test")
    }

    /// Connected document store scoped to `tenant_id`
    pub async fn store(&self, tenant_id: &str) -> MongoDocumentStore {
        let tenant = TenantPath::new(tenant_id).expect("Invalid tenant id");
        MongoDocumentStore::connect(&self.config(), tenant)
            .await
            .expect("Failed to connect to test MongoDB")
    }

    /// Get the connection string for manual client creation
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

// Container is automatically cleaned up when TestMongo is dropped
impl Drop for TestMongo {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test MongoDB container");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::{DatabaseError, DocumentStore};
    use serde_json::json;

    #[tokio::test]
    #[ignore] // Requires Docker
    async fn test_mongo_document_lifecycle() {
        let mongo = TestMongo::new().await;
        let store = mongo.store("acme").await;
        let speakers = store.collection("speakers");

        let fields = json!({"name": "Ada", "tags": ["math"]})
            .as_object()
            .cloned()
            .unwrap();
        let id = speakers.add(fields).await.unwrap();

        let patch = json!({"company": "Engines"}).as_object().cloned().unwrap();
        speakers.update(&id, patch).await.unwrap();

        let stored = speakers.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.fields["name"], "Ada");
        assert_eq!(stored.fields["company"], "Engines");
        assert_eq!(speakers.count().await.unwrap(), 1);

        speakers.delete(&id).await.unwrap();
        let err = speakers.delete(&id).await.unwrap_err();
        assert!(matches!(err, DatabaseError::DocumentNotFound { .. }));

        store.close().await;
        store.close().await;
    }
}
