use axum::{
    Json,
    extract::State,
    http::{HeaderValue, header},
    response::{AppendHeaders, IntoResponse},
};
use axum_helpers::{
    AppError, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, UnauthorizedResponse,
    },
};

use super::WorkshopState;
use crate::error::WorkshopResult;
use crate::models::{DesignationStats, LoginRequest, MessageResponse};

/// Log in as admin
///
/// Sets the `admin_session` cookie for 24 hours on success.
#[utoipa::path(
    post,
    path = "/admin/login",
    tag = "Admin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
pub async fn login(
    State(state): State<WorkshopState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.gate.login(&input.password)?;

    let cookie = HeaderValue::from_str(&state.gate.session_cookie())
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(MessageResponse::new("Login successful")),
    ))
}

/// Attendee counts by designation
#[utoipa::path(
    get,
    path = "/admin/stats",
    tag = "Admin",
    responses(
        (status = 200, description = "Counts per designation, unordered", body = DesignationStats),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn stats(State(state): State<WorkshopState>) -> WorkshopResult<Json<DesignationStats>> {
    let stats = state.stats.stats_by_designation().await?;
    Ok(Json(DesignationStats { stats }))
}
