use crate::model::note::{NoteId, UiNote};

/// A requested change to stored notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modification {
    CreateNote { title: String, description: String },
    /// Full replacement of title and description for `UiNote::id`.
    UpdateNote(UiNote),
    DeleteNote(NoteId),
}

impl Modification {
    pub fn create(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::CreateNote {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Stable label used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateNote { .. } => "create",
            Self::UpdateNote(_) => "update",
            Self::DeleteNote(_) => "delete",
        }
    }
}
