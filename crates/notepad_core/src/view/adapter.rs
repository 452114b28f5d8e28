//! Imperative list adapter and screen binder.
//!
//! # Responsibility
//! - Keep a positional item list and report per-position changes when a new
//!   list is submitted.
//! - Mutate long-lived bindings in place from each view-state snapshot.
//!
//! # Invariants
//! - Items are matched by `id`; contents are compared by equality.
//! - `Removed` positions refer to the old list and come in descending order;
//!   `Inserted`/`Changed` positions refer to the new list in ascending order.
//!   Applying them in sequence turns the old list into the new one.

use crate::model::note::{NoteId, UiNote};
use crate::view::{
    CONFIRM_LABEL_CREATE, CONFIRM_LABEL_UPDATE, DIALOG_TITLE_CREATE, DIALOG_TITLE_UPDATE,
    FAB_LABEL_ADD, FAB_LABEL_MAXIMUM,
};
use crate::viewmodel::{DialogMode, NoteForm, NoteListViewState};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    Removed { position: usize },
    Inserted { position: usize },
    Changed { position: usize },
}

/// Text bound into one list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItemBinding {
    pub title: String,
    pub description: String,
}

type ItemClick = Box<dyn Fn(&UiNote) + Send + Sync>;

pub struct NoteListAdapter {
    items: Vec<UiNote>,
    on_item_click: ItemClick,
}

impl NoteListAdapter {
    pub fn new(on_item_click: impl Fn(&UiNote) + Send + Sync + 'static) -> Self {
        Self {
            items: Vec::new(),
            on_item_click: Box::new(on_item_click),
        }
    }

    /// Replaces the items and returns the changes needed to update rows.
    pub fn submit_list(&mut self, items: Vec<UiNote>) -> Vec<ListChange> {
        let changes = diff(&self.items, &items);
        self.items = items;
        changes
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn item(&self, position: usize) -> Option<&UiNote> {
        self.items.get(position)
    }

    pub fn bind(&self, position: usize) -> Option<NoteItemBinding> {
        self.items.get(position).map(|note| NoteItemBinding {
            title: note.title.clone(),
            description: note.description.clone(),
        })
    }

    /// Forwards a row click. Returns `false` for positions out of range.
    pub fn click(&self, position: usize) -> bool {
        match self.items.get(position) {
            Some(note) => {
                (self.on_item_click)(note);
                true
            }
            None => false,
        }
    }
}

fn diff(old: &[UiNote], new: &[UiNote]) -> Vec<ListChange> {
    let new_index: HashMap<NoteId, usize> = new
        .iter()
        .enumerate()
        .map(|(position, note)| (note.id, position))
        .collect();
    let old_index: HashMap<NoteId, usize> = old
        .iter()
        .enumerate()
        .map(|(position, note)| (note.id, position))
        .collect();

    let retained_in_old: Vec<NoteId> = old
        .iter()
        .filter(|note| new_index.contains_key(&note.id))
        .map(|note| note.id)
        .collect();
    let retained_in_new: Vec<NoteId> = new
        .iter()
        .filter(|note| old_index.contains_key(&note.id))
        .map(|note| note.id)
        .collect();

    if retained_in_old != retained_in_new {
        // Reordered: rebind everything.
        let mut changes: Vec<ListChange> = (0..old.len())
            .rev()
            .map(|position| ListChange::Removed { position })
            .collect();
        changes.extend((0..new.len()).map(|position| ListChange::Inserted { position }));
        return changes;
    }

    let mut changes: Vec<ListChange> = old
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, note)| !new_index.contains_key(&note.id))
        .map(|(position, _)| ListChange::Removed { position })
        .collect();

    for (position, note) in new.iter().enumerate() {
        match old_index.get(&note.id) {
            None => changes.push(ListChange::Inserted { position }),
            Some(&old_position) if old[old_position] != *note => {
                changes.push(ListChange::Changed { position })
            }
            Some(_) => {}
        }
    }
    changes
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FabBinding {
    pub text: &'static str,
    pub clickable: bool,
}

/// An open composition dialog and its editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogBinding {
    pub title: &'static str,
    pub confirm_label: &'static str,
    pub form: NoteForm,
    pub delete_visible: bool,
    pub editing: Option<NoteId>,
}

impl DialogBinding {
    fn for_mode(mode: DialogMode<'_>) -> Option<Self> {
        match mode {
            DialogMode::Hidden => None,
            DialogMode::Create => Some(Self {
                title: DIALOG_TITLE_CREATE,
                confirm_label: CONFIRM_LABEL_CREATE,
                form: NoteForm::default(),
                delete_visible: false,
                editing: None,
            }),
            DialogMode::Edit(note) => Some(Self {
                title: DIALOG_TITLE_UPDATE,
                confirm_label: CONFIRM_LABEL_UPDATE,
                form: NoteForm::from_note(note),
                delete_visible: true,
                editing: Some(note.id),
            }),
        }
    }
}

/// Widget-like flags of the main screen, updated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainBinding {
    pub progress_visible: bool,
    pub empty_visible: bool,
    pub list_visible: bool,
    pub fab: FabBinding,
    pub dialog: Option<DialogBinding>,
}

impl Default for MainBinding {
    fn default() -> Self {
        Self {
            progress_visible: true,
            empty_visible: false,
            list_visible: false,
            fab: FabBinding {
                text: FAB_LABEL_ADD,
                clickable: false,
            },
            dialog: None,
        }
    }
}

impl MainBinding {
    /// Applies `state` to the bindings and the adapter.
    ///
    /// An already open dialog for the same target keeps its edited fields.
    pub fn bind(
        &mut self,
        state: &NoteListViewState,
        adapter: &mut NoteListAdapter,
    ) -> Vec<ListChange> {
        self.fab = if state.creation_enabled() {
            FabBinding {
                text: FAB_LABEL_ADD,
                clickable: !state.is_loading,
            }
        } else {
            FabBinding {
                text: FAB_LABEL_MAXIMUM,
                clickable: false,
            }
        };

        if state.is_loading {
            self.progress_visible = true;
            self.empty_visible = false;
            self.list_visible = false;
        } else if state.notes.is_empty() {
            self.progress_visible = false;
            self.empty_visible = true;
            self.list_visible = false;
        } else {
            self.progress_visible = false;
            self.empty_visible = false;
            self.list_visible = true;
        }
        let changes = adapter.submit_list(state.notes.clone());

        let wanted = DialogBinding::for_mode(state.dialog());
        let keep_open = matches!(
            (&self.dialog, &wanted),
            (Some(open), Some(wanted))
                if open.editing == wanted.editing && open.title == wanted.title
        );
        if !keep_open {
            self.dialog = wanted;
        }
        changes
    }
}
