//! Note model and its transport shapes

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::util::{collapse_whitespace, truncate_with_ellipsis};

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid regex"));

/// Server-assigned note identifier. Always a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(NonZeroU64);

impl NoteId {
    /// Returns `None` for zero.
    #[must_use]
    pub const fn new(value: u64) -> Option<Self> {
        match NonZeroU64::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Error returned when parsing a [`NoteId`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("note id must be a positive integer, got '{0}'")]
pub struct ParseNoteIdError(String);

impl FromStr for NoteId {
    type Err = ParseNoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<NonZeroU64>()
            .map(Self)
            .map_err(|_| ParseNoteIdError(s.to_string()))
    }
}

/// A note as stored by the remote service.
///
/// Field names on the wire follow the service's `Tarea` schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(rename = "titulo")]
    pub title: String,
    /// May contain rich-text markup
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "completada", default)]
    pub completed: bool,
}

impl Note {
    /// Description with markup tags removed.
    #[must_use]
    pub fn plain_description(&self) -> String {
        strip_markup(&self.description)
    }

    /// Single-line plain-text preview of the description, at most `max_chars` long.
    #[must_use]
    pub fn description_preview(&self, max_chars: usize) -> String {
        truncate_with_ellipsis(&collapse_whitespace(&self.plain_description()), max_chars)
    }

    /// Check whether the note carries the same user-editable content as `fields`.
    #[must_use]
    pub fn matches(&self, fields: &NewNote) -> bool {
        self.title == fields.title
            && self.description == fields.description
            && self.completed == fields.completed
    }
}

/// Remove anything that looks like a markup tag (`<...>`).
///
/// # Examples
///
/// ```
/// use notas_core::models::strip_markup;
///
/// assert_eq!(strip_markup("<b>Milk</b> and <i>eggs</i>"), "Milk and eggs");
/// ```
#[must_use]
pub fn strip_markup(text: &str) -> String {
    MARKUP_TAG.replace_all(text, "").into_owned()
}

/// Fields for a note that has not been created yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "completada")]
    pub completed: bool,
}

impl NewNote {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            completed: false,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Trim the title and reject it if nothing is left.
    pub fn normalized(mut self) -> Result<Self, NoteValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        self.title = title.to_string();
        Ok(self)
    }
}

/// Partial update. Fields left as `None` are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePatch {
    #[serde(rename = "titulo", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "completada", default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl NotePatch {
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }

    /// Reject empty patches and blank replacement titles.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.is_empty() {
            return Err(NoteValidationError::EmptyPatch);
        }
        if self
            .title
            .as_deref()
            .is_some_and(|title| title.trim().is_empty())
        {
            return Err(NoteValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// The note as it looks after this patch is applied. The id never changes.
    #[must_use]
    pub fn apply_to(&self, note: &Note) -> Note {
        Note {
            id: note.id,
            title: self.title.clone().unwrap_or_else(|| note.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| note.description.clone()),
            completed: self.completed.unwrap_or(note.completed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NoteValidationError {
    #[error("note title must not be empty")]
    EmptyTitle,
    #[error("note update must change at least one field")]
    EmptyPatch,
}
