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
use crate::models::{CreateSpeaker, MessageResponse, Speaker, UpdateSpeaker};

/// List all speakers
#[utoipa::path(
    get,
    path = "/speakers",
    tag = "Speakers",
    responses(
        (status = 200, description = "All speakers, unordered", body = Vec<Speaker>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
pub async fn list_speakers(
    State(state): State<WorkshopState>,
) -> WorkshopResult<Json<Vec<Speaker>>> {
    let speakers = state.speakers.list().await?;
    Ok(Json(speakers))
}

/// Create a speaker
#[utoipa::path(
    post,
    path = "/admin/speakers",
    tag = "Admin",
    request_body = CreateSpeaker,
    responses(
        (status = 201, description = "Speaker created", body = Speaker),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn create_speaker(
    State(state): State<WorkshopState>,
    ValidatedJson(input): ValidatedJson<CreateSpeaker>,
) -> WorkshopResult<impl IntoResponse> {
    let speaker = state.speakers.create(input).await?;
    Ok((StatusCode::CREATED, Json(speaker)))
}

/// Update a speaker
///
/// Omitted and empty fields are left untouched; `null` clears an optional field.
#[utoipa::path(
    put,
    path = "/admin/speakers/{id}",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Speaker ID")
    ),
    request_body = UpdateSpeaker,
    responses(
        (status = 200, description = "Speaker after the update", body = Speaker),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn update_speaker(
    State(state): State<WorkshopState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateSpeaker>,
) -> WorkshopResult<Json<Speaker>> {
    let speaker = state.speakers.update(&id, input).await?;
    Ok(Json(speaker))
}

/// Delete a speaker
///
/// Sessions that reference the speaker keep the stale id.
#[utoipa::path(
    delete,
    path = "/admin/speakers/{id}",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Speaker ID")
    ),
    responses(
        (status = 200, description = "Speaker deleted", body = MessageResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn delete_speaker(
    State(state): State<WorkshopState>,
    Path(id): Path<String>,
) -> WorkshopResult<Json<MessageResponse>> {
    state.speakers.delete(&id).await?;
    Ok(Json(MessageResponse::new("Speaker deleted successfully")))
}
