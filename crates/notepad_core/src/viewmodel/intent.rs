//! User intents and the validation rules presentations enforce.

use crate::model::note::{NoteId, UiNote};
use crate::modifier::ModifyOutcome;
use std::fmt::{Display, Formatter};

/// A user action forwarded by a presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteIntent {
    OpenCreate,
    OpenEdit(UiNote),
    Create { title: String, description: String },
    Update(UiNote),
    Delete(NoteId),
    Dismiss,
}

/// Why an intent was refused without touching storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    StillLoading,
    MaximumNotes,
    BlankField,
    /// The intent does not match the dialog currently open.
    NoDialog,
}

impl Display for RejectReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StillLoading => write!(f, "notes are still loading"),
            Self::MaximumNotes => write!(f, "maximum number of notes reached"),
            Self::BlankField => write!(f, "title and description must not be blank"),
            Self::NoDialog => write!(f, "no matching note dialog is open"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    /// Only the view state changed.
    Applied,
    /// A modification reached storage.
    Submitted(ModifyOutcome),
    Rejected(RejectReason),
}

/// Edit buffer behind the composition dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub description: String,
}

impl NoteForm {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Prefills the buffer from the note being edited.
    pub fn from_note(note: &UiNote) -> Self {
        Self::new(note.title.as_str(), note.description.as_str())
    }

    /// Confirm is allowed only when neither field is blank.
    pub fn can_confirm(&self) -> bool {
        is_not_blank(&self.title) && is_not_blank(&self.description)
    }
}

pub(crate) fn is_not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}
