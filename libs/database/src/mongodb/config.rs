use std::path::PathBuf;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_optional};

/// Database used when none is configured.
pub const DEFAULT_DATABASE: &str = "default-project";

/// MongoDB connection configuration
///
/// The connection string is not stored directly: it is resolved at connect
/// time from the explicit credentials file first, then from the ambient
/// connection string (see [`super::resolve_credentials`]).
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// // Ambient connection string only
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "events");
///
/// // Credentials file, falling back to the ambient string
/// let config = MongoConfig::default()
///     .with_credentials_file("./mongo-credentials")
///     .with_app_name("workshop-api");
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Explicit credentials file holding a connection string
    pub credentials_file: Option<PathBuf>,

    /// Ambient connection string (e.g. injected by the platform)
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub ambient_url: Option<String>,

    /// Database name to use
    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Maximum number of connections the driver keeps open
    pub max_pool_size: u32,

    /// Minimum number of connections the driver keeps open
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Create a config from an ambient connection string and default database
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            ambient_url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Create a config from an ambient connection string and database name
    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            ambient_url: Some(url.into()),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Prefer a credentials file over the ambient connection string
    pub fn with_credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Get the database name
    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            credentials_file: None,
            ambient_url: None,
            database: DEFAULT_DATABASE.to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

#[cfg(feature = "config")]
fn parse_var<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env_optional(key) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Load MongoConfig from environment variables
///
/// Environment variables:
/// - `MONGODB_CREDENTIALS_FILE` (optional) - file holding the connection string
/// - `MONGODB_URL` or `MONGO_URL` (optional) - ambient connection string
/// - `MONGODB_DATABASE` or `MONGO_DATABASE` (optional, default: `default-project`)
/// - `MONGODB_APP_NAME` (optional) - Application name for server logs
/// - `MONGODB_MAX_POOL_SIZE` (optional, default: 100)
/// - `MONGODB_MIN_POOL_SIZE` (optional, default: 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (optional, default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (optional, default: 30)
///
/// A missing connection string is not a configuration error here; it
/// surfaces as a connection failure when the gateway is opened.
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let credentials_file = env_optional("MONGODB_CREDENTIALS_FILE").map(PathBuf::from);
        let ambient_url = env_optional("MONGODB_URL").or_else(|| env_optional("MONGO_URL"));
        let database = env_optional("MONGODB_DATABASE")
            .or_else(|| env_optional("MONGO_DATABASE"))
            .unwrap_or(defaults.database);

        Ok(Self {
            credentials_file,
            ambient_url,
            database,
            app_name: env_optional("MONGODB_APP_NAME"),
            max_pool_size: parse_var("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            min_pool_size: parse_var("MONGODB_MIN_POOL_SIZE", defaults.min_pool_size)?,
            connect_timeout_secs: parse_var(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: parse_var(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mongo_config_new() {
        let config = MongoConfig::new("mongodb://localhost:27017");
        assert_eq!(config.ambient_url.as_deref(), Some("mongodb://localhost:27017"));
        assert_eq!(config.database, DEFAULT_DATABASE);
        assert!(config.credentials_file.is_none());
        assert_eq!(config.max_pool_size, 100);
    }

    #[test]
    fn test_mongo_config_builders() {
        let config = MongoConfig::with_database("mongodb://localhost:27017", "events")
            .with_credentials_file("./creds")
            .with_app_name("workshop-api");
        assert_eq!(config.database(), "events");
        assert_eq!(config.credentials_file, Some(PathBuf::from("./creds")));
        assert_eq!(config.app_name.as_deref(), Some("workshop-api"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_fallback_names() {
        temp_env::with_vars(
            [
                ("MONGODB_CREDENTIALS_FILE", None::<&str>),
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", Some("mongodb://fallback:27017")),
                ("MONGODB_DATABASE", None::<&str>),
                ("MONGO_DATABASE", Some("fallbackdb")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.ambient_url.as_deref(), Some("mongodb://fallback:27017"));
                assert_eq!(config.database, "fallbackdb");
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_without_url_is_not_an_error() {
        temp_env::with_vars(
            [
                ("MONGODB_CREDENTIALS_FILE", None::<&str>),
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", None::<&str>),
                ("MONGODB_DATABASE", None::<&str>),
                ("MONGO_DATABASE", None::<&str>),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert!(config.ambient_url.is_none());
                assert_eq!(config.database, DEFAULT_DATABASE);
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_invalid_pool_size() {
        temp_env::with_var("MONGODB_MAX_POOL_SIZE", Some("lots"), || {
            let err = MongoConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("MONGODB_MAX_POOL_SIZE"));
        });
    }
}
