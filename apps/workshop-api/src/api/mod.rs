//! API routes module

pub mod health;

use axum::Router;
use domain_workshop::{AdminGate, WorkshopState, handlers};

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    let gate = AdminGate::new(
        state.config.admin.clone(),
        state.config.environment.use_https(),
    );

    handlers::router(WorkshopState::new(state.store.as_ref(), gate))
        .merge(health::router(state.clone()))
}
