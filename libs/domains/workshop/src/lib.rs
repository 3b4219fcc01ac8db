//! Workshop Domain
//!
//! Attendees, speakers and sessions of a single workshop event, stored as
//! documents under the fixed tenant path `workshop/{tenant_id}`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, admin gate middleware
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Generic CRUD over one sub-collection, patch resolution
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  database   │  ← DocumentStore / DocumentCollection (MongoDB, in-memory)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use database::TenantPath;
//! use database::mongodb::{MongoConfig, MongoDocumentStore};
//! use domain_workshop::{AdminGate, AdminSecret, WorkshopState, handlers};
//!
//! let store = MongoDocumentStore::connect(&MongoConfig::new(url), TenantPath::new("acme")?).await?;
//! let gate = AdminGate::new(AdminSecret::Plain("dev".into()), false);
//!
//! let router = handlers::router(WorkshopState::new(&store, gate));
//! ```

pub mod admin;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod presence;
pub mod repository;
pub mod service;
pub mod stats;

// Re-export commonly used types
pub use admin::{AdminGate, AdminSecret, SessionState, require_admin};
pub use entity::Entity;
pub use error::{WorkshopError, WorkshopResult};
pub use handlers::{ApiDoc, WorkshopState};
pub use models::{
    Attendee, AttendeeCount, CreateAttendee, CreateSession, CreateSpeaker, DesignationStat,
    DesignationStats, LoginRequest, MessageResponse, Session, SessionRef, Speaker, SpeakerRef,
    UpdateAttendee, UpdateSession, UpdateSpeaker,
};
pub use presence::{PatchBuilder, Presence, ResolvePatch};
pub use repository::DocumentRepository;
pub use service::EntityService;
pub use stats::{ScanStatsReporter, StatsReporter};
