mod common;

use common::{titles, wait_for_state};
use notepad_core::{
    Graph, IntentOutcome, ModifyOutcome, NoteIntent, NoteListViewModel, RejectReason, UiNote,
    MAX_NOTES,
};

fn create(title: &str, description: &str) -> NoteIntent {
    NoteIntent::Create {
        title: title.to_string(),
        description: description.to_string(),
    }
}

/// Opens the create dialog and confirms it, as a presentation would.
fn create_via_dialog(
    view_model: &NoteListViewModel,
    title: &str,
    description: &str,
) -> IntentOutcome {
    match view_model.dispatch(NoteIntent::OpenCreate).unwrap() {
        IntentOutcome::Applied => view_model.dispatch(create(title, description)).unwrap(),
        rejected => rejected,
    }
}

#[tokio::test]
async fn load_clears_loading_flag_with_current_notes() {
    let graph = Graph::in_memory().unwrap();
    let view_model = graph.note_list_view_model();
    assert!(view_model.snapshot().is_loading);

    view_model.load().unwrap();
    let mut rx = view_model.state();
    let state = wait_for_state(&mut rx, |state| !state.is_loading).await;
    assert!(state.notes.is_empty());
    assert!(state.creation_enabled());
}

#[tokio::test]
async fn five_notes_disable_creation_and_delete_reenables_it() {
    let graph = Graph::in_memory().unwrap();
    let view_model = graph.note_list_view_model();
    view_model.load().unwrap();
    let mut rx = view_model.state();
    wait_for_state(&mut rx, |state| !state.is_loading).await;

    let inputs = [("A", "a"), ("B", "b"), ("C", "c"), ("D", "d"), ("E", "e")];
    for (idx, (title, description)) in inputs.into_iter().enumerate() {
        let outcome = create_via_dialog(&view_model, title, description);
        assert!(matches!(
            outcome,
            IntentOutcome::Submitted(ModifyOutcome::Created(_))
        ));
        wait_for_state(&mut rx, |state| state.notes.len() == idx + 1).await;
    }

    let full = view_model.snapshot();
    assert_eq!(full.notes.len(), MAX_NOTES);
    assert_eq!(titles(&full), vec!["A", "B", "C", "D", "E"]);
    assert!(!full.creation_enabled());
    assert_eq!(
        view_model.dispatch(NoteIntent::OpenCreate).unwrap(),
        IntentOutcome::Rejected(RejectReason::MaximumNotes)
    );
    assert_eq!(
        view_model.dispatch(create("F", "f")).unwrap(),
        IntentOutcome::Rejected(RejectReason::MaximumNotes)
    );

    view_model
        .dispatch(NoteIntent::OpenEdit(full.notes[2].clone()))
        .unwrap();
    view_model
        .dispatch(NoteIntent::Delete(full.notes[2].id))
        .unwrap();
    let after = wait_for_state(&mut rx, |state| state.notes.len() == MAX_NOTES - 1).await;
    assert!(after.creation_enabled());
    assert_eq!(titles(&after), vec!["A", "B", "D", "E"]);
}

#[tokio::test]
async fn blank_fields_are_rejected_without_touching_storage() {
    let graph = Graph::in_memory().unwrap();
    let view_model = graph.note_list_view_model();
    view_model.load().unwrap();
    let mut rx = view_model.state();
    wait_for_state(&mut rx, |state| !state.is_loading).await;

    view_model.dispatch(NoteIntent::OpenCreate).unwrap();
    assert_eq!(
        view_model.dispatch(create("   ", "desc")).unwrap(),
        IntentOutcome::Rejected(RejectReason::BlankField)
    );
    assert!(view_model.snapshot().show_composition_dialog);

    let note = UiNote::new(1, "t", "x");
    view_model.dispatch(NoteIntent::OpenEdit(note.clone())).unwrap();
    assert_eq!(
        view_model
            .dispatch(NoteIntent::Update(note.edited("", "x")))
            .unwrap(),
        IntentOutcome::Rejected(RejectReason::BlankField)
    );
    assert_eq!(graph.note_repo().note(1).unwrap(), None);
}

#[tokio::test]
async fn creation_is_rejected_while_loading() {
    let graph = Graph::in_memory().unwrap();
    let view_model = graph.note_list_view_model();

    assert_eq!(
        view_model.dispatch(NoteIntent::OpenCreate).unwrap(),
        IntentOutcome::Rejected(RejectReason::StillLoading)
    );
    assert!(!view_model.snapshot().show_composition_dialog);
}

#[tokio::test]
async fn edit_dialog_flow_updates_note_and_hides_dialog() {
    let graph = Graph::in_memory().unwrap();
    let view_model = graph.note_list_view_model();
    view_model.load().unwrap();
    let mut rx = view_model.state();
    wait_for_state(&mut rx, |state| !state.is_loading).await;

    create_via_dialog(&view_model, "A", "a");
    let loaded = wait_for_state(&mut rx, |state| state.notes.len() == 1).await;
    let note = loaded.notes[0].clone();

    view_model.dispatch(NoteIntent::OpenEdit(note.clone())).unwrap();
    let editing = view_model.snapshot();
    assert!(editing.show_composition_dialog);
    assert_eq!(editing.note_to_edit.as_ref(), Some(&note));

    let outcome = view_model
        .dispatch(NoteIntent::Update(note.edited("A2", "a2")))
        .unwrap();
    assert_eq!(outcome, IntentOutcome::Submitted(ModifyOutcome::Updated));
    let hidden = view_model.snapshot();
    assert!(!hidden.show_composition_dialog);
    assert_eq!(hidden.note_to_edit, None);

    let updated = wait_for_state(&mut rx, |state| {
        state.notes.first().map(|n| n.title.as_str()) == Some("A2")
    })
    .await;
    assert_eq!(updated.notes[0].id, note.id);
}

#[tokio::test]
async fn dismiss_hides_dialog_and_clears_edit_target() {
    let graph = Graph::in_memory().unwrap();
    let view_model = graph.note_list_view_model();
    let note = UiNote::new(9, "x", "y");

    view_model.show_note_composition_dialog(true, Some(note));
    assert!(view_model.snapshot().note_to_edit.is_some());

    assert_eq!(
        view_model.dispatch(NoteIntent::Dismiss).unwrap(),
        IntentOutcome::Applied
    );
    let state = view_model.snapshot();
    assert!(!state.show_composition_dialog);
    assert_eq!(state.note_to_edit, None);
}

#[tokio::test]
async fn stop_freezes_state_until_reloaded() {
    let graph = Graph::in_memory().unwrap();
    let view_model = graph.note_list_view_model();
    view_model.load().unwrap();
    let mut rx = view_model.state();
    wait_for_state(&mut rx, |state| !state.is_loading).await;

    view_model.stop();
    graph
        .modifier()
        .submit(notepad_core::Modification::create("A", "a"))
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(view_model.snapshot().notes.is_empty());

    view_model.load().unwrap();
    let state = wait_for_state(&mut rx, |state| state.notes.len() == 1).await;
    assert_eq!(titles(&state), vec!["A"]);
}

#[tokio::test]
async fn back_to_back_creates_stop_at_the_cap() {
    let graph = Graph::in_memory().unwrap();
    let view_model = graph.note_list_view_model();
    view_model.load().unwrap();
    let mut rx = view_model.state();
    wait_for_state(&mut rx, |state| !state.is_loading).await;

    // No waiting for emissions between creates.
    let outcomes: Vec<IntentOutcome> = (0..7)
        .map(|idx| create_via_dialog(&view_model, &format!("N{idx}"), "body"))
        .collect();

    let submitted = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, IntentOutcome::Submitted(_)))
        .count();
    assert_eq!(submitted, MAX_NOTES);
    assert_eq!(
        &outcomes[MAX_NOTES..],
        &[IntentOutcome::Rejected(RejectReason::MaximumNotes); 2]
    );
    assert_eq!(graph.note_repo().count().unwrap(), MAX_NOTES as u64);
    assert!(!view_model.snapshot().show_composition_dialog);
}

#[tokio::test]
async fn confirm_intents_require_matching_dialog() {
    let graph = Graph::in_memory().unwrap();
    let view_model = graph.note_list_view_model();
    view_model.load().unwrap();
    let mut rx = view_model.state();
    wait_for_state(&mut rx, |state| !state.is_loading).await;

    assert_eq!(
        view_model.dispatch(create("A", "a")).unwrap(),
        IntentOutcome::Rejected(RejectReason::NoDialog)
    );
    assert_eq!(graph.note_repo().count().unwrap(), 0);

    create_via_dialog(&view_model, "A", "a");
    let loaded = wait_for_state(&mut rx, |state| state.notes.len() == 1).await;
    let note = loaded.notes[0].clone();

    assert_eq!(
        view_model.dispatch(NoteIntent::Delete(note.id)).unwrap(),
        IntentOutcome::Rejected(RejectReason::NoDialog)
    );

    view_model.dispatch(NoteIntent::OpenCreate).unwrap();
    assert_eq!(
        view_model
            .dispatch(NoteIntent::Update(note.edited("B", "b")))
            .unwrap(),
        IntentOutcome::Rejected(RejectReason::NoDialog)
    );

    let other = UiNote::new(note.id + 1, "x", "y");
    view_model.dispatch(NoteIntent::OpenEdit(other)).unwrap();
    assert_eq!(
        view_model.dispatch(NoteIntent::Delete(note.id)).unwrap(),
        IntentOutcome::Rejected(RejectReason::NoDialog)
    );
    assert_eq!(graph.note_repo().note(note.id).unwrap(), Some(note));
}

#[test]
fn load_outside_runtime_is_an_error() {
    let graph = Graph::in_memory().unwrap();
    let view_model = graph.note_list_view_model();
    assert!(view_model.load().is_err());
}
