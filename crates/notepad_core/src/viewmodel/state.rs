//! Immutable view-state snapshot shared by both presentations.
//!
//! # Invariants
//! - Creation is enabled only while fewer than `MAX_NOTES` notes exist.
//! - `note_to_edit` is `Some` only while the composition dialog is shown as
//!   an edit dialog.

use crate::model::note::UiNote;

/// Maximum number of notes the presentations allow creating.
pub const MAX_NOTES: usize = 5;

/// What the composition dialog currently represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode<'a> {
    Hidden,
    Create,
    Edit(&'a UiNote),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListViewState {
    pub show_composition_dialog: bool,
    pub note_to_edit: Option<UiNote>,
    pub is_loading: bool,
    pub notes: Vec<UiNote>,
}

impl Default for NoteListViewState {
    fn default() -> Self {
        Self {
            show_composition_dialog: false,
            note_to_edit: None,
            is_loading: true,
            notes: Vec::new(),
        }
    }
}

impl NoteListViewState {
    pub fn creation_enabled(&self) -> bool {
        self.notes.len() < MAX_NOTES
    }

    pub fn dialog(&self) -> DialogMode<'_> {
        match (self.show_composition_dialog, self.note_to_edit.as_ref()) {
            (false, _) => DialogMode::Hidden,
            (true, None) => DialogMode::Create,
            (true, Some(note)) => DialogMode::Edit(note),
        }
    }

    /// Returns a loaded state carrying `notes`.
    pub fn with_notes(&self, notes: Vec<UiNote>) -> Self {
        Self {
            show_composition_dialog: self.show_composition_dialog,
            note_to_edit: self.note_to_edit.clone(),
            is_loading: false,
            notes,
        }
    }

    /// Returns a state with the dialog shown or hidden.
    ///
    /// Hiding always clears `note_to_edit`.
    pub fn with_dialog(&self, should_show: bool, note_to_edit: Option<UiNote>) -> Self {
        Self {
            show_composition_dialog: should_show,
            note_to_edit: if should_show { note_to_edit } else { None },
            is_loading: self.is_loading,
            notes: self.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DialogMode, NoteListViewState, MAX_NOTES};
    use crate::model::note::UiNote;

    fn notes(count: usize) -> Vec<UiNote> {
        (0..count)
            .map(|idx| UiNote::new(idx as i64 + 1, format!("t{idx}"), format!("d{idx}")))
            .collect()
    }

    #[test]
    fn default_state_is_loading_with_hidden_dialog() {
        let state = NoteListViewState::default();
        assert!(state.is_loading);
        assert!(state.notes.is_empty());
        assert_eq!(state.dialog(), DialogMode::Hidden);
    }

    #[test]
    fn creation_enabled_only_below_cap() {
        let state = NoteListViewState::default();
        assert!(state.with_notes(notes(MAX_NOTES - 1)).creation_enabled());
        assert!(!state.with_notes(notes(MAX_NOTES)).creation_enabled());
    }

    #[test]
    fn hiding_dialog_clears_note_to_edit() {
        let note = UiNote::new(7, "a", "b");
        let editing = NoteListViewState::default().with_dialog(true, Some(note.clone()));
        assert_eq!(editing.dialog(), DialogMode::Edit(&note));

        let hidden = editing.with_dialog(false, Some(note));
        assert_eq!(hidden.note_to_edit, None);
        assert_eq!(hidden.dialog(), DialogMode::Hidden);
    }

    #[test]
    fn with_notes_keeps_dialog_state() {
        let note = UiNote::new(1, "a", "b");
        let state = NoteListViewState::default()
            .with_dialog(true, Some(note.clone()))
            .with_notes(vec![note.clone()]);
        assert!(!state.is_loading);
        assert_eq!(state.note_to_edit, Some(note));
    }
}
