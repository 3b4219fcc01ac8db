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
use crate::models::{Attendee, AttendeeCount, CreateAttendee, MessageResponse, UpdateAttendee};

/// List all attendees
#[utoipa::path(
    get,
    path = "/attendees",
    tag = "Attendees",
    responses(
        (status = 200, description = "All registered attendees, unordered", body = Vec<Attendee>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
pub async fn list_attendees(
    State(state): State<WorkshopState>,
) -> WorkshopResult<Json<Vec<Attendee>>> {
    let attendees = state.attendees.list().await?;
    Ok(Json(attendees))
}

/// Count registered attendees
#[utoipa::path(
    get,
    path = "/attendees/count",
    tag = "Attendees",
    responses(
        (status = 200, description = "Attendee count", body = AttendeeCount),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
pub async fn count_attendees(
    State(state): State<WorkshopState>,
) -> WorkshopResult<Json<AttendeeCount>> {
    let count = state.attendees.count().await?;
    Ok(Json(AttendeeCount { count }))
}

/// Register an attendee
#[utoipa::path(
    post,
    path = "/attendees",
    tag = "Attendees",
    request_body = CreateAttendee,
    responses(
        (status = 201, description = "Attendee registered", body = Attendee),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
pub async fn register_attendee(
    State(state): State<WorkshopState>,
    ValidatedJson(input): ValidatedJson<CreateAttendee>,
) -> WorkshopResult<impl IntoResponse> {
    let attendee = state.attendees.create(input).await?;
    Ok((StatusCode::CREATED, Json(attendee)))
}

/// Update an attendee
#[utoipa::path(
    put,
    path = "/admin/attendees/{id}",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Attendee ID")
    ),
    request_body = UpdateAttendee,
    responses(
        (status = 200, description = "Attendee after the update", body = Attendee),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn update_attendee(
    State(state): State<WorkshopState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateAttendee>,
) -> WorkshopResult<Json<Attendee>> {
    let attendee = state.attendees.update(&id, input).await?;
    Ok(Json(attendee))
}

/// Delete an attendee
#[utoipa::path(
    delete,
    path = "/admin/attendees/{id}",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Attendee ID")
    ),
    responses(
        (status = 200, description = "Attendee deleted", body = MessageResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn delete_attendee(
    State(state): State<WorkshopState>,
    Path(id): Path<String>,
) -> WorkshopResult<Json<MessageResponse>> {
    state.attendees.delete(&id).await?;
    Ok(Json(MessageResponse::new("Attendee deleted successfully")))
}
