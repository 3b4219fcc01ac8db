use mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::{info, instrument};

use super::{MongoConfig, resolve_credentials};
use crate::common::{DatabaseError, DatabaseResult};

/// Connect to MongoDB with default pool settings and return a Client
///
/// # Example
/// ```ignore
/// use database::mongodb::connect;
///
/// let client = connect("mongodb://localhost:27017").await?;
/// let db = client.database("mydb");
/// ```
pub async fn connect(url: &str) -> DatabaseResult<Client> {
    connect_from_config(&MongoConfig::new(url)).await
}

/// Resolve credentials and connect using a MongoConfig
///
/// The credentials file wins over the ambient connection string. The
/// connection is verified with a `ping` against the configured database;
/// any failure to parse, reach or authenticate becomes
/// [`DatabaseError::ConnectionFailed`]. No retry is attempted.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config};
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "mydb");
/// let client = connect_from_config(&config).await?;
/// ```
///
/// With FromEnv (requires `config` feature):
/// ```ignore
/// use database::mongodb::connect_from_config;
/// use core_config::FromEnv;
///
/// let config = MongoConfig::from_env()?;
/// let client = connect_from_config(&config).await?;
/// ```
#[instrument(skip(config), fields(database = %config.database))]
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    let credentials = resolve_credentials(
        config.credentials_file.as_deref(),
        config.ambient_url.as_deref(),
    )?;
    info!(source = ?credentials.source, "Attempting to connect to MongoDB");

    let mut options = ClientOptions::parse(&credentials.url)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(format!("invalid connection string: {}", e)))?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    // Verify connection
    client
        .database(&config.database)
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_without_credentials_fails() {
        let config = MongoConfig::default();
        let err = connect_from_config(&config).await.unwrap_err();
        assert!(err.is_connection());
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let err = connect("not-a-mongodb-url").await.unwrap_err();
        assert!(err.is_connection());
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect_from_config() {
        let mongo_url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let config = MongoConfig::with_database(mongo_url, "test");
        let result = connect_from_config(&config).await;
        assert!(result.is_ok());
    }
}
