//! Document-store gateway for the workshop backend
//!
//! This library exposes the narrow document interface the domain layer
//! consumes ([`DocumentStore`] / [`DocumentCollection`]) and the MongoDB
//! implementation of it.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB gateway, connector and credential resolution
//! - `config` - `core_config::FromEnv` support for [`mongodb::MongoConfig`]
//! - `mock` - exports `MockDocumentCollection` for downstream tests
//! - `all` - `mongodb` + `config`
//!
//! # Example
//!
//! ```ignore
//! use database::{DocumentStore, TenantPath};
//! use database::mongodb::{MongoConfig, MongoDocumentStore};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "events");
//! let store = MongoDocumentStore::connect(&config, TenantPath::new("workshop")?).await?;
//!
//! // Handle scoped to workshop/workshop/attendees
//! let attendees = store.collection("attendees");
//! let documents = attendees.list().await?;
//! store.close().await;
//! ```

pub mod common;
pub mod document;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
pub use document::{
    Document, DocumentCollection, DocumentStore, ROOT_COLLECTION, StoredDocument, TenantPath,
};

#[cfg(any(test, feature = "mock"))]
pub use document::MockDocumentCollection;
