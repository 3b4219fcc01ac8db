//! Readiness endpoint

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{
    HealthCheckFuture, errors::responses::ServiceUnavailableResponse, run_health_checks,
};

use crate::state::AppState;

/// Create the readiness router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check - pings the document store
#[utoipa::path(
    get,
    path = "/api/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Document store reachable"),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.clone();
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "document_store",
        Box::pin(async move { store.ping().await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await
}
