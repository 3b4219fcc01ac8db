//! Partial update resolution
//!
//! Update payloads are sparse: every field carries a [`Presence`] tag and the
//! resolver turns the provided ones into the minimal field-level patch.
//!
//! | JSON                  | `Presence`    | Patch                    |
//! |-----------------------|---------------|--------------------------|
//! | field omitted         | `Absent`      | untouched                |
//! | `""`                  | `Set("")`     | untouched                |
//! | `"text"` / `[..]`     | `Set(v)`      | field set to `v`         |
//! | `[]`                  | `Set([])`     | field set to `[]`        |
//! | `null`                | `Clear`       | `""` / `[]`, or rejected on required fields |

use database::Document;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{WorkshopError, WorkshopResult};

/// A field of an update payload.
///
/// Use with `#[serde(default)]` so an omitted field deserializes to `Absent`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Presence<T> {
    #[default]
    Absent,
    /// Explicit JSON `null`
    Clear,
    Set(T),
}

impl<T> Presence<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Presence::Absent)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Presence::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl Presence<String> {
    /// The value if it will be written: set and non-empty.
    pub fn provided(&self) -> Option<&str> {
        self.as_set().map(String::as_str).filter(|s| !s.is_empty())
    }
}

impl<T> From<Option<T>> for Presence<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Presence::Set(value),
            None => Presence::Clear,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Presence<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Presence::from)
    }
}

/// Resolve a sparse update payload into a store patch.
pub trait ResolvePatch {
    fn resolve(self) -> WorkshopResult<Document>;
}

/// Accumulates the provided fields of an update payload.
#[derive(Debug, Default)]
pub struct PatchBuilder {
    fields: Document,
}

impl PatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Optional text field: `null` clears it to `""`.
    pub fn text(&mut self, name: &str, value: Presence<String>) -> &mut Self {
        match value {
            Presence::Set(text) if !text.is_empty() => {
                self.fields.insert(name.to_string(), Value::String(text));
            }
            Presence::Clear => {
                self.fields.insert(name.to_string(), Value::String(String::new()));
            }
            _ => {}
        }
        self
    }

    /// Required text field: `null` is rejected.
    pub fn required_text(
        &mut self,
        name: &str,
        value: Presence<String>,
    ) -> WorkshopResult<&mut Self> {
        if matches!(value, Presence::Clear) {
            return Err(WorkshopError::invalid(format!(
                "Field '{}' is required and cannot be cleared",
                name
            )));
        }
        Ok(self.text(name, value))
    }

    /// List field: any list, including `[]`, is written; `null` clears it to `[]`.
    pub fn list(&mut self, name: &str, value: Presence<Vec<String>>) -> &mut Self {
        let list = match value {
            Presence::Set(items) => items,
            Presence::Clear => Vec::new(),
            Presence::Absent => return self,
        };
        self.fields.insert(
            name.to_string(),
            Value::Array(list.into_iter().map(Value::String).collect()),
        );
        self
    }

    /// Finish the patch; an empty patch is rejected.
    pub fn finish(self) -> WorkshopResult<Document> {
        if self.fields.is_empty() {
            return Err(WorkshopError::invalid("No fields to update"));
        }
        Ok(self.fields)
    }
}
