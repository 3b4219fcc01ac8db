//! MongoDB document-store gateway
//!
//! Provides credential resolution, connection management and the
//! [`MongoDocumentStore`] implementation of [`crate::DocumentStore`].

mod config;
mod connector;
mod credentials;
mod store;

pub use config::MongoConfig;
pub use connector::{connect, connect_from_config};
pub use credentials::{CredentialSource, ResolvedCredentials, resolve_credentials};
pub use store::{MongoDocumentCollection, MongoDocumentStore};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
