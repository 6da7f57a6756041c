//! Note entity and request types.
//!
//! A [`Note`] is created from a [`NewNote`], mutated by a [`NotePatch`] and
//! addressed by its [`NoteId`]. Request types carry every field as an
//! `Option` so that a missing field surfaces as a [`ValidationError`] rather
//! than a deserialization failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::validation::{ValidationError, validate_content, validate_title};

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a note.
///
/// Ids are assigned by the store from a strictly increasing counter starting
/// at 1 and are never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct NoteId(pub u64);

impl NoteId {
    /// The first id handed out by an empty store.
    pub const FIRST: NoteId = NoteId(1);

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one, or `None` once the id space
    /// is exhausted.
    #[must_use]
    pub const fn next(self) -> Option<NoteId> {
        match self.0.checked_add(1) {
            Some(value) => Some(NoteId(value)),
            None => None,
        }
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

// ============================================================================
// Note
// ============================================================================

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Note {
    /// Unique note identifier.
    #[schema(value_type = u64, example = 1)]
    pub id: NoteId,
    /// Note title.
    #[schema(example = "Groceries")]
    pub title: String,
    /// Note content.
    #[schema(example = "Milk, eggs, coffee")]
    pub content: String,
    /// Creation timestamp (RFC 3339, UTC).
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp (RFC 3339, UTC).
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Build a note whose timestamps are both `now`.
    pub fn new(id: NoteId, fields: ValidNewNote, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            content: fields.content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a validated patch in place and refresh `updated_at`.
    ///
    /// `updated_at` never moves before `created_at`, even if `now` does.
    pub fn apply(&mut self, patch: NotePatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.updated_at = now.max(self.created_at);
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Request body for creating a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewNote {
    /// Note title (1..=256 characters, not blank).
    #[schema(required = true, example = "Groceries")]
    pub title: Option<String>,
    /// Note content (not blank).
    #[schema(required = true, example = "Milk, eggs, coffee")]
    pub content: Option<String>,
}

impl NewNote {
    /// Creates a request with both fields set.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }

    /// Check that both fields are present and valid.
    pub fn validate(self) -> Result<ValidNewNote, ValidationError> {
        let title = self
            .title
            .ok_or(ValidationError::Missing { field: "title" })?;
        validate_title(&title)?;

        let content = self
            .content
            .ok_or(ValidationError::Missing { field: "content" })?;
        validate_content(&content)?;

        Ok(ValidNewNote { title, content })
    }
}

/// A [`NewNote`] whose fields have passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidNewNote {
    title: String,
    content: String,
}

/// Partial update for a note. Absent fields keep their prior values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotePatch {
    /// New title (1..=256 characters, not blank).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Groceries for Sunday")]
    pub title: Option<String>,
    /// New content (not blank).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Milk, eggs, coffee, bread")]
    pub content: Option<String>,
}

impl NotePatch {
    /// Set the title to change.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the content to change.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Check every field that is present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(content) = &self.content {
            validate_content(content)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
