//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted `Note` row and its view-facing `UiNote` projection.
//!
//! # Invariants
//! - `id` is assigned by storage and never reused while the row exists.
//! - `UiNote` carries exactly the persisted fields; projection is lossless.

use serde::{Deserialize, Serialize};

/// Storage-assigned identifier of one note row.
pub type NoteId = i64;

/// Persisted note row as stored in the `notes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub description: String,
}

/// View-facing note value rendered by presentations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UiNote {
    pub id: NoteId,
    pub title: String,
    pub description: String,
}

impl UiNote {
    pub fn new(id: NoteId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Returns a copy of this note with title and description replaced.
    ///
    /// The id is preserved; this is the only supported way to edit a note.
    pub fn edited(&self, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(self.id, title, description)
    }
}

impl From<Note> for UiNote {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            description: note.description,
        }
    }
}

impl From<UiNote> for Note {
    fn from(note: UiNote) -> Self {
        Self {
            id: note.id,
            title: note.title,
            description: note.description,
        }
    }
}
