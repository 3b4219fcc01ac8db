//! Application state management.

use std::sync::Arc;

use database::DocumentStore;

/// Shared application state.
///
/// Cloned into handlers (inexpensive Arc clones).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Document store scoped to the configured tenant
    pub store: Arc<dyn DocumentStore>,
}
