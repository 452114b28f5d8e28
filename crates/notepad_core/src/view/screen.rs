//! Declarative screen description.
//!
//! # Invariants
//! - `render` is pure: equal states render equal screens.
//! - The FAB is absent while the first emission is pending.

use crate::model::note::{NoteId, UiNote};
use crate::view::{
    CONFIRM_LABEL_CREATE, CONFIRM_LABEL_UPDATE, DIALOG_TITLE_CREATE, DIALOG_TITLE_UPDATE,
    EMPTY_TEXT, FAB_LABEL_ADD, FAB_LABEL_MAXIMUM,
};
use crate::viewmodel::{DialogMode, NoteForm, NoteListViewState};

pub const APP_BAR_TITLE: &str = "Notepad";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteScreen {
    pub app_bar_title: &'static str,
    pub body: NoteListBody,
    pub fab: Option<NewNoteFab>,
    pub dialog: Option<NoteDialog>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteListBody {
    Loading,
    Empty { text: &'static str },
    Items(Vec<NoteItem>),
}

/// One card in the list; clicking it opens the edit dialog for `note`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub note: UiNote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FabStyle {
    Secondary,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewNoteFab {
    pub label: &'static str,
    pub enabled: bool,
    pub style: FabStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDialog {
    pub title: &'static str,
    pub confirm_label: &'static str,
    /// Initial field values of the edit buffer.
    pub form: NoteForm,
    /// `Some` for edit dialogs; also controls the delete button.
    pub editing: Option<NoteId>,
}

impl NoteDialog {
    pub fn shows_delete(&self) -> bool {
        self.editing.is_some()
    }
}

/// Renders the full screen for `state`.
pub fn render(state: &NoteListViewState) -> NoteScreen {
    NoteScreen {
        app_bar_title: APP_BAR_TITLE,
        body: render_body(state),
        fab: render_fab(state),
        dialog: render_dialog(state),
    }
}

fn render_body(state: &NoteListViewState) -> NoteListBody {
    if state.is_loading {
        NoteListBody::Loading
    } else if state.notes.is_empty() {
        NoteListBody::Empty { text: EMPTY_TEXT }
    } else {
        NoteListBody::Items(
            state
                .notes
                .iter()
                .cloned()
                .map(|note| NoteItem { note })
                .collect(),
        )
    }
}

fn render_fab(state: &NoteListViewState) -> Option<NewNoteFab> {
    if state.is_loading {
        return None;
    }

    let fab = if state.creation_enabled() {
        NewNoteFab {
            label: FAB_LABEL_ADD,
            enabled: true,
            style: FabStyle::Secondary,
        }
    } else {
        NewNoteFab {
            label: FAB_LABEL_MAXIMUM,
            enabled: false,
            style: FabStyle::Error,
        }
    };
    Some(fab)
}

fn render_dialog(state: &NoteListViewState) -> Option<NoteDialog> {
    match state.dialog() {
        DialogMode::Hidden => None,
        DialogMode::Create => Some(NoteDialog {
            title: DIALOG_TITLE_CREATE,
            confirm_label: CONFIRM_LABEL_CREATE,
            form: NoteForm::default(),
            editing: None,
        }),
        DialogMode::Edit(note) => Some(NoteDialog {
            title: DIALOG_TITLE_UPDATE,
            confirm_label: CONFIRM_LABEL_UPDATE,
            form: NoteForm::from_note(note),
            editing: Some(note.id),
        }),
    }
}
