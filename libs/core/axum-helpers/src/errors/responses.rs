//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error - Document store fault",
    content_type = "application/json",
    example = json!({
        "code": 2001,
        "error": "DOCUMENT_STORE_ERROR",
        "message": "A document store error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": {
            "email": [{
                "code": "email",
                "message": null,
                "params": {"value": "not-an-email"}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Empty or invalid update",
    content_type = "application/json",
    example = json!({
        "code": 1003,
        "error": "BAD_REQUEST",
        "message": "No fields to update"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1005,
        "error": "NOT_FOUND",
        "message": "Resource not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized - Admin session required",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "error": "UNAUTHORIZED",
        "message": "Unauthorized"
    })
)]
pub struct UnauthorizedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable - Document store unreachable",
    content_type = "application/json",
    example = json!({
        "code": 2002,
        "error": "DOCUMENT_STORE_UNAVAILABLE",
        "message": "The document store is unavailable"
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);
