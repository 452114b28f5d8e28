use notepad_core::view::adapter::{ListChange, MainBinding, NoteListAdapter};
use notepad_core::view::screen::{render, FabStyle, NoteListBody, APP_BAR_TITLE};
use notepad_core::{NoteForm, NoteListViewState, UiNote, MAX_NOTES};
use std::sync::{Arc, Mutex};

fn loaded(count: usize) -> NoteListViewState {
    let notes = (1..=count)
        .map(|id| UiNote::new(id as i64, format!("Title {id}"), format!("Desc {id}")))
        .collect();
    NoteListViewState::default().with_notes(notes)
}

#[test]
fn loading_screen_has_spinner_and_no_fab() {
    let screen = render(&NoteListViewState::default());
    assert_eq!(screen.app_bar_title, APP_BAR_TITLE);
    assert_eq!(screen.body, NoteListBody::Loading);
    assert_eq!(screen.fab, None);
    assert_eq!(screen.dialog, None);
}

#[test]
fn empty_list_renders_placeholder_and_enabled_fab() {
    let screen = render(&loaded(0));
    assert_eq!(screen.body, NoteListBody::Empty { text: "No notes" });
    let fab = screen.fab.expect("fab is shown once loaded");
    assert_eq!(fab.label, "Add New Note");
    assert!(fab.enabled);
    assert_eq!(fab.style, FabStyle::Secondary);
}

#[test]
fn full_list_renders_maximum_fab() {
    let screen = render(&loaded(MAX_NOTES));
    match &screen.body {
        NoteListBody::Items(items) => assert_eq!(items.len(), MAX_NOTES),
        other => panic!("unexpected body: {other:?}"),
    }
    let fab = screen.fab.unwrap();
    assert_eq!(fab.label, "Maximum Notes");
    assert!(!fab.enabled);
    assert_eq!(fab.style, FabStyle::Error);
}

#[test]
fn dialogs_render_create_and_edit_variants() {
    let state = loaded(2);

    let create = render(&state.with_dialog(true, None)).dialog.unwrap();
    assert_eq!(create.title, "New Note");
    assert_eq!(create.confirm_label, "Create");
    assert_eq!(create.form, NoteForm::default());
    assert!(!create.shows_delete());

    let target = state.notes[1].clone();
    let edit = render(&state.with_dialog(true, Some(target.clone())))
        .dialog
        .unwrap();
    assert_eq!(edit.title, "Update Note");
    assert_eq!(edit.confirm_label, "Update");
    assert_eq!(edit.form, NoteForm::new("Title 2", "Desc 2"));
    assert_eq!(edit.editing, Some(target.id));
    assert!(edit.shows_delete());
}

#[test]
fn render_is_pure() {
    let state = loaded(3).with_dialog(true, None);
    assert_eq!(render(&state), render(&state));
}

#[test]
fn binder_toggles_visibility_and_fab() {
    let mut adapter = NoteListAdapter::new(|_| {});
    let mut binding = MainBinding::default();

    binding.bind(&NoteListViewState::default(), &mut adapter);
    assert!(binding.progress_visible && !binding.empty_visible && !binding.list_visible);
    assert!(!binding.fab.clickable);

    binding.bind(&loaded(0), &mut adapter);
    assert!(!binding.progress_visible && binding.empty_visible && !binding.list_visible);
    assert_eq!(binding.fab.text, "Add New Note");
    assert!(binding.fab.clickable);

    let changes = binding.bind(&loaded(MAX_NOTES), &mut adapter);
    assert!(!binding.progress_visible && !binding.empty_visible && binding.list_visible);
    assert_eq!(binding.fab.text, "Maximum Notes");
    assert!(!binding.fab.clickable);
    assert_eq!(changes.len(), MAX_NOTES);
    assert!(changes
        .iter()
        .all(|change| matches!(change, ListChange::Inserted { .. })));
    assert_eq!(adapter.item_count(), MAX_NOTES);
    assert_eq!(adapter.bind(0).unwrap().title, "Title 1");
}

#[test]
fn open_dialog_keeps_edits_across_list_updates() {
    let mut adapter = NoteListAdapter::new(|_| {});
    let mut binding = MainBinding::default();
    let state = loaded(1).with_dialog(true, None);

    binding.bind(&state, &mut adapter);
    binding.dialog.as_mut().unwrap().form.title = "typed".to_string();

    binding.bind(&loaded(2).with_dialog(true, None), &mut adapter);
    assert_eq!(binding.dialog.as_ref().unwrap().form.title, "typed");

    binding.bind(&loaded(2), &mut adapter);
    assert_eq!(binding.dialog, None);
}

#[test]
fn adapter_click_forwards_note_at_position() {
    let clicked = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&clicked);
    let mut adapter = NoteListAdapter::new(move |note| sink.lock().unwrap().push(note.id));

    adapter.submit_list(loaded(3).notes);
    assert!(adapter.click(2));
    assert!(!adapter.click(3));
    assert_eq!(*clicked.lock().unwrap(), vec![3]);
}

#[test]
fn adapter_reports_removed_and_changed_rows() {
    let mut adapter = NoteListAdapter::new(|_| {});
    adapter.submit_list(loaded(3).notes);

    let mut next = loaded(3).notes;
    next.remove(0);
    next[1] = next[1].edited("renamed", "Desc 3");

    assert_eq!(
        adapter.submit_list(next),
        vec![
            ListChange::Removed { position: 0 },
            ListChange::Changed { position: 1 },
        ]
    );
}
