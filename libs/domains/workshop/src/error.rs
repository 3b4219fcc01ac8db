use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum WorkshopError {
    /// Malformed input, an empty patch, or clearing a required field
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Field-level validation failures (email syntax, avatar URL, ...)
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// Store I/O or decode fault
    #[error("Store error: {0}")]
    Store(String),

    /// Store unreachable
    #[error("Connection error: {0}")]
    Connection(String),
}

pub type WorkshopResult<T> = Result<T, WorkshopError>;

impl WorkshopError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Map a store failure for `kind` into the domain taxonomy.
    pub fn from_store(kind: &'static str, err: DatabaseError) -> Self {
        match err {
            DatabaseError::DocumentNotFound { id, .. } => Self::not_found(kind, id),
            other => other.into(),
        }
    }
}

impl From<DatabaseError> for WorkshopError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::ConnectionFailed(msg) => WorkshopError::Connection(msg),
            DatabaseError::DocumentNotFound { collection, id } => WorkshopError::NotFound {
                kind: "Document",
                id: format!("{}/{}", collection, id),
            },
            other => WorkshopError::Store(other.to_string()),
        }
    }
}

/// Convert WorkshopError to AppError for standardized error responses
impl From<WorkshopError> for AppError {
    fn from(err: WorkshopError) -> Self {
        match err {
            WorkshopError::InvalidRequest(msg) => AppError::BadRequest(msg),
            WorkshopError::Validation(errors) => AppError::ValidationError(errors),
            WorkshopError::Unauthorized(msg) => AppError::Unauthorized(msg),
            err @ WorkshopError::NotFound { .. } => AppError::NotFound(err.to_string()),
            WorkshopError::Store(msg) => AppError::Store(msg),
            WorkshopError::Connection(msg) => AppError::StoreUnavailable(msg),
        }
    }
}

impl IntoResponse for WorkshopError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_store_not_found_is_attributed_to_kind() {
        let err = WorkshopError::from_store(
            "Speaker",
            DatabaseError::not_found("workshop/acme/speakers", "abc"),
        );
        assert_eq!(err.to_string(), "Speaker abc not found");
    }

    #[test]
    fn test_connection_failure_maps_to_connection() {
        let err: WorkshopError = DatabaseError::ConnectionFailed("refused".into()).into();
        assert!(matches!(err, WorkshopError::Connection(_)));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (WorkshopError::invalid("No fields to update"), StatusCode::BAD_REQUEST),
            (WorkshopError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (WorkshopError::not_found("Session", "s1"), StatusCode::NOT_FOUND),
            (WorkshopError::Store("decode".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (WorkshopError::Connection("down".into()), StatusCode::SERVICE_UNAVAILABLE),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
