use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, ServiceUnavailableResponse, UnauthorizedResponse,
    },
};

use super::WorkshopState;
use crate::error::WorkshopResult;
use crate::models::{CreateSession, MessageResponse, Session, UpdateSession};

/// List all sessions
#[utoipa::path(
    get,
    path = "/sessions",
    tag = "Sessions",
    responses(
        (status = 200, description = "All sessions, unordered", body = Vec<Session>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
pub async fn list_sessions(
    State(state): State<WorkshopState>,
) -> WorkshopResult<Json<Vec<Session>>> {
    let sessions = state.sessions.list().await?;
    Ok(Json(sessions))
}

/// Create a session
#[utoipa::path(
    post,
    path = "/admin/sessions",
    tag = "Admin",
    request_body = CreateSession,
    responses(
        (status = 201, description = "Session created", body = Session),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn create_session(
    State(state): State<WorkshopState>,
    ValidatedJson(input): ValidatedJson<CreateSession>,
) -> WorkshopResult<impl IntoResponse> {
    let session = state.sessions.create(input).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// Update a session
///
/// Omitted and empty fields are left untouched. `speakerIds: []` empties the list.
#[utoipa::path(
    put,
    path = "/admin/sessions/{id}",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Session ID")
    ),
    request_body = UpdateSession,
    responses(
        (status = 200, description = "Session after the update", body = Session),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn update_session(
    State(state): State<WorkshopState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateSession>,
) -> WorkshopResult<Json<Session>> {
    let session = state.sessions.update(&id, input).await?;
    Ok(Json(session))
}

/// Delete a session
///
/// Speakers that list the session keep the stale id.
#[utoipa::path(
    delete,
    path = "/admin/sessions/{id}",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session deleted", body = MessageResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn delete_session(
    State(state): State<WorkshopState>,
    Path(id): Path<String>,
) -> WorkshopResult<Json<MessageResponse>> {
    state.sessions.delete(&id).await?;
    Ok(Json(MessageResponse::new("Session deleted successfully")))
}
