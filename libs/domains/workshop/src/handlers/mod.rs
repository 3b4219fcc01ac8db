//! HTTP surface of the workshop backend
//!
//! Paths are relative to the `/api` prefix the app nests this router under.

mod admin;
mod attendees;
mod sessions;
mod speakers;

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use axum_helpers::errors::responses::{
    BadRequestResponse, BadRequestValidationResponse, InternalServerErrorResponse,
    NotFoundResponse, ServiceUnavailableResponse, UnauthorizedResponse,
};
use database::DocumentStore;
use utoipa::OpenApi;

use crate::admin::{AdminGate, require_admin};
use crate::models::{
    Attendee, AttendeeCount, CreateAttendee, CreateSession, CreateSpeaker, DesignationStat,
    DesignationStats, LoginRequest, MessageResponse, Session, Speaker, UpdateAttendee,
    UpdateSession, UpdateSpeaker,
};
use crate::repository::DocumentRepository;
use crate::service::EntityService;
use crate::stats::{ScanStatsReporter, StatsReporter};

/// OpenAPI documentation for the workshop API
#[derive(OpenApi)]
#[openapi(
    paths(
        attendees::list_attendees,
        attendees::count_attendees,
        attendees::register_attendee,
        attendees::update_attendee,
        attendees::delete_attendee,
        speakers::list_speakers,
        speakers::create_speaker,
        speakers::update_speaker,
        speakers::delete_speaker,
        sessions::list_sessions,
        sessions::create_session,
        sessions::update_session,
        sessions::delete_session,
        admin::login,
        admin::stats,
    ),
    components(
        schemas(
            Attendee, CreateAttendee, UpdateAttendee, AttendeeCount,
            Speaker, CreateSpeaker, UpdateSpeaker,
            Session, CreateSession, UpdateSession,
            DesignationStat, DesignationStats, LoginRequest, MessageResponse
        ),
        responses(
            BadRequestResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = "Attendees", description = "Attendee registration"),
        (name = "Speakers", description = "Speaker catalog"),
        (name = "Sessions", description = "Session catalog"),
        (name = "Admin", description = "Admin login and reporting")
    )
)]
pub struct ApiDoc;

/// Shared handler state. Cloned per request; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct WorkshopState {
    pub gate: Arc<AdminGate>,
    pub attendees: EntityService<Attendee>,
    pub speakers: EntityService<Speaker>,
    pub sessions: EntityService<Session>,
    pub stats: Arc<dyn StatsReporter>,
}

impl WorkshopState {
    /// Wire services for the store's tenant scope.
    pub fn new(store: &dyn DocumentStore, gate: AdminGate) -> Self {
        let attendees = DocumentRepository::<Attendee>::from_store(store);

        Self {
            gate: Arc::new(gate),
            stats: Arc::new(ScanStatsReporter::new(attendees.clone())),
            attendees: EntityService::new(attendees),
            speakers: EntityService::new(DocumentRepository::from_store(store)),
            sessions: EntityService::new(DocumentRepository::from_store(store)),
        }
    }
}

/// Create the workshop router with all HTTP endpoints.
///
/// Every `/admin/*` route except `/admin/login` sits behind the admin gate.
pub fn router(state: WorkshopState) -> Router {
    let protected = Router::new()
        .route("/admin/stats", get(admin::stats))
        .route(
            "/admin/attendees/{id}",
            put(attendees::update_attendee).delete(attendees::delete_attendee),
        )
        .route("/admin/speakers", post(speakers::create_speaker))
        .route(
            "/admin/speakers/{id}",
            put(speakers::update_speaker).delete(speakers::delete_speaker),
        )
        .route("/admin/sessions", post(sessions::create_session))
        .route(
            "/admin/sessions/{id}",
            put(sessions::update_session).delete(sessions::delete_session),
        )
        .route_layer(middleware::from_fn_with_state(
            state.gate.clone(),
            require_admin,
        ));

    Router::new()
        .route(
            "/attendees",
            get(attendees::list_attendees).post(attendees::register_attendee),
        )
        .route("/attendees/count", get(attendees::count_attendees))
        .route("/speakers", get(speakers::list_speakers))
        .route("/sessions", get(sessions::list_sessions))
        .route("/admin/login", post(admin::login))
        .merge(protected)
        .with_state(state)
}
