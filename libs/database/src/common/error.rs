/// Unified error type for all document-store operations
///
/// Every backend reports failures through this type so callers can tell a
/// missing document apart from an unreachable store.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// MongoDB driver errors raised by an operation on a live connection
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// The store could not be reached or no credential source resolved
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The addressed document does not exist
    #[error("Document '{id}' not found in '{collection}'")]
    DocumentNotFound { collection: String, id: String },

    /// A stored document could not be converted to or from a field mapping
    #[error("Document codec error: {0}")]
    Codec(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic store error
    #[error("Database error: {0}")]
    Generic(String),
}

impl DatabaseError {
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DocumentNotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Whether the error means the store itself is unavailable
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_))
    }
}

/// Result type alias for store operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_collection_and_id() {
        let err = DatabaseError::not_found("workshop/acme/speakers", "abc123");
        assert_eq!(
            err.to_string(),
            "Document 'abc123' not found in 'workshop/acme/speakers'"
        );
        assert!(!err.is_connection());
    }

    #[test]
    fn test_connection_failed_is_connection() {
        assert!(DatabaseError::ConnectionFailed("refused".into()).is_connection());
    }
}
