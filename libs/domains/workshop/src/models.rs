use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail, ValidateUrl, ValidationError, ValidationErrors};

use crate::entity::Entity;
use crate::error::WorkshopResult;
use crate::presence::{PatchBuilder, Presence, ResolvePatch};
use database::Document;

/// Id of a speaker as referenced from a session.
///
/// Possibly stale: nothing keeps it in sync with the speakers collection, so
/// it may name a speaker that was deleted.
pub type SpeakerRef = String;

/// Id of a session as referenced from a speaker.
///
/// Possibly stale, see [`SpeakerRef`].
pub type SessionRef = String;

fn validate_avatar(avatar: &str) -> Result<(), ValidationError> {
    if avatar.is_empty() || avatar.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}

fn finish_validation(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

// ---------------------------------------------------------------------------
// Attendee
// ---------------------------------------------------------------------------

/// A registered workshop attendee
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Attendee {
    /// Store-assigned id (empty until persisted)
    pub id: String,
    pub name: String,
    pub email: String,
    pub designation: String,
    /// Set by the server at registration, never changed afterwards
    pub registered_at: DateTime<Utc>,
}

/// DTO for registering an attendee
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAttendee {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "designation is required"))]
    pub designation: String,
}

/// DTO for updating an attendee. `registeredAt` cannot be changed.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateAttendee {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub name: Presence<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub email: Presence<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub designation: Presence<String>,
}

impl Validate for UpdateAttendee {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(email) = self.email.provided() {
            if !email.validate_email() {
                errors.add("email", ValidationError::new("email"));
            }
        }
        finish_validation(errors)
    }
}

impl ResolvePatch for UpdateAttendee {
    fn resolve(self) -> WorkshopResult<Document> {
        let mut patch = PatchBuilder::new();
        patch.required_text("name", self.name)?;
        patch.required_text("email", self.email)?;
        patch.required_text("designation", self.designation)?;
        patch.finish()
    }
}

impl Entity for Attendee {
    const COLLECTION: &'static str = "attendees";
    const KIND: &'static str = "Attendee";

    type Draft = CreateAttendee;
    type Patch = UpdateAttendee;

    fn from_draft(draft: CreateAttendee) -> Self {
        Self {
            id: String::new(),
            name: draft.name,
            email: draft.email,
            designation: draft.designation,
            registered_at: Utc::now(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

// ---------------------------------------------------------------------------
// Speaker
// ---------------------------------------------------------------------------

/// A workshop speaker
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Speaker {
    pub id: String,
    pub name: String,
    pub bio: String,
    /// Avatar image URL, empty when none
    pub avatar: String,
    /// Sessions this speaker presents, in display order
    pub sessions: Vec<SessionRef>,
}

/// DTO for creating a speaker
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSpeaker {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    #[validate(custom(function = "validate_avatar"))]
    pub avatar: String,
    #[serde(default)]
    pub sessions: Vec<SessionRef>,
}

/// DTO for updating a speaker
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateSpeaker {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub name: Presence<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub bio: Presence<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub avatar: Presence<String>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<String>>)]
    pub sessions: Presence<Vec<SessionRef>>,
}

impl Validate for UpdateSpeaker {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(avatar) = self.avatar.provided() {
            if let Err(e) = validate_avatar(avatar) {
                errors.add("avatar", e);
            }
        }
        finish_validation(errors)
    }
}

impl ResolvePatch for UpdateSpeaker {
    fn resolve(self) -> WorkshopResult<Document> {
        let mut patch = PatchBuilder::new();
        patch
            .required_text("name", self.name)?
            .text("bio", self.bio)
            .text("avatar", self.avatar)
            .list("sessions", self.sessions);
        patch.finish()
    }
}

impl Entity for Speaker {
    const COLLECTION: &'static str = "speakers";
    const KIND: &'static str = "Speaker";

    type Draft = CreateSpeaker;
    type Patch = UpdateSpeaker;

    fn from_draft(draft: CreateSpeaker) -> Self {
        Self {
            id: String::new(),
            name: draft.name,
            bio: draft.bio,
            avatar: draft.avatar,
            sessions: draft.sessions,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A workshop session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Free-form start time as entered by the organizer
    pub time: String,
    /// Free-form duration, e.g. "2 hours"
    pub duration: String,
    pub speaker_ids: Vec<SpeakerRef>,
}

/// DTO for creating a session
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSession {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub speaker_ids: Vec<SpeakerRef>,
}

/// DTO for updating a session
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSession {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub title: Presence<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub description: Presence<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub time: Presence<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub duration: Presence<String>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<String>>)]
    pub speaker_ids: Presence<Vec<SpeakerRef>>,
}

impl Validate for UpdateSession {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

impl ResolvePatch for UpdateSession {
    fn resolve(self) -> WorkshopResult<Document> {
        let mut patch = PatchBuilder::new();
        patch
            .required_text("title", self.title)?
            .text("description", self.description)
            .text("time", self.time)
            .text("duration", self.duration)
            .list("speakerIds", self.speaker_ids);
        patch.finish()
    }
}

impl Entity for Session {
    const COLLECTION: &'static str = "sessions";
    const KIND: &'static str = "Session";

    type Draft = CreateSession;
    type Patch = UpdateSession;

    fn from_draft(draft: CreateSession) -> Self {
        Self {
            id: String::new(),
            title: draft.title,
            description: draft.description,
            time: draft.time,
            duration: draft.duration,
            speaker_ids: draft.speaker_ids,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Number of registered attendees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttendeeCount {
    pub count: u64,
}

/// Attendee count for one designation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DesignationStat {
    pub designation: String,
    pub count: u64,
}

/// Attendee counts grouped by designation, in no particular order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DesignationStats {
    pub stats: Vec<DesignationStat>,
}

/// Admin login request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Plain acknowledgement message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::StoredDocument;
    use serde_json::json;

    #[test]
    fn test_document_round_trip_moves_id_to_key() {
        let mut session = Session::from_draft(CreateSession {
            title: "Rust in production".to_string(),
            description: String::new(),
            time: "10:00".to_string(),
            duration: "1 hour".to_string(),
            speaker_ids: vec!["sp1".to_string()],
        });
        session.set_id("s1".to_string());

        let document = session.to_document().unwrap();
        assert!(!document.contains_key("id"));
        assert_eq!(document["speakerIds"], json!(["sp1"]));

        let decoded = Session::from_document(StoredDocument::new("s1", document)).unwrap();
        assert_eq!(decoded, session);
    }

    #[test]
    fn test_missing_stored_fields_decode_to_defaults() {
        let fields = json!({"name": "Ada"}).as_object().cloned().unwrap();
        let speaker = Speaker::from_document(StoredDocument::new("sp1", fields)).unwrap();
        assert_eq!(speaker.id, "sp1");
        assert!(speaker.sessions.is_empty());
    }

    #[test]
    fn test_wrongly_typed_stored_field_is_a_store_error() {
        let fields = json!({"name": 42}).as_object().cloned().unwrap();
        let err = Speaker::from_document(StoredDocument::new("sp1", fields)).unwrap_err();
        assert!(matches!(err, crate::WorkshopError::Store(_)));
    }

    #[test]
    fn test_attendee_serializes_camel_case() {
        let attendee = Attendee::from_draft(CreateAttendee {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            designation: "Engineer".to_string(),
        });
        let value = serde_json::to_value(&attendee).unwrap();
        assert!(value.get("registeredAt").is_some());
        assert_eq!(value["id"], "");
    }

    #[test]
    fn test_create_attendee_validation() {
        let invalid = CreateAttendee {
            name: String::new(),
            email: "not-an-email".to_string(),
            designation: "PM".to_string(),
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_speaker_avatar_must_be_url_when_present() {
        let mut speaker = CreateSpeaker {
            name: "Ada".to_string(),
            bio: String::new(),
            avatar: String::new(),
            sessions: vec![],
        };
        assert!(speaker.validate().is_ok());

        speaker.avatar = "not a url".to_string();
        assert!(speaker.validate().is_err());

        speaker.avatar = "https://example.com/ada.png".to_string();
        assert!(speaker.validate().is_ok());
    }

    #[test]
    fn test_update_attendee_rejects_bad_email_and_clears() {
        let patch: UpdateAttendee =
            serde_json::from_value(json!({"email": "nope"})).unwrap();
        assert!(patch.validate().is_err());

        let patch: UpdateAttendee = serde_json::from_value(json!({"name": null})).unwrap();
        assert!(patch.resolve().is_err());
    }

    #[test]
    fn test_update_session_resolves_only_provided_fields() {
        let patch: UpdateSession =
            serde_json::from_value(json!({"duration": "2 hours", "title": ""})).unwrap();
        let fields = patch.resolve().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["duration"], "2 hours");
    }

    #[test]
    fn test_update_speaker_null_clears_optional_fields() {
        let patch: UpdateSpeaker =
            serde_json::from_value(json!({"bio": null, "sessions": null})).unwrap();
        let fields = patch.resolve().unwrap();
        assert_eq!(fields["bio"], "");
        assert_eq!(fields["sessions"], json!([]));
    }
}
