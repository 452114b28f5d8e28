mod common;

use common::WAIT;
use futures_util::StreamExt;
use notepad_core::{DataModifier, Graph, Modification, NoteDao};
use tokio::time::timeout;

#[tokio::test]
async fn notes_stream_emits_current_list_then_each_mutation() {
    let graph = Graph::in_memory().unwrap();
    let modifier = graph.modifier();
    modifier.submit(Modification::create("A", "a")).unwrap();

    let mut notes = graph.note_repo().notes();
    let first = timeout(WAIT, notes.next()).await.unwrap().unwrap().unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].title, "A");

    modifier.submit(Modification::create("B", "b")).unwrap();
    let second = timeout(WAIT, notes.next()).await.unwrap().unwrap().unwrap();
    let titles: Vec<&str> = second.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);

    modifier
        .submit(Modification::DeleteNote(second[0].id))
        .unwrap();
    let third = timeout(WAIT, notes.next()).await.unwrap().unwrap().unwrap();
    assert_eq!(third.len(), 1);
    assert_eq!(third[0].title, "B");
}

#[tokio::test]
async fn count_stream_tracks_row_count() {
    let graph = Graph::in_memory().unwrap();
    let mut count = graph.note_repo().note_count();
    assert_eq!(timeout(WAIT, count.next()).await.unwrap().unwrap().unwrap(), 0);

    graph
        .modifier()
        .submit(Modification::create("A", "a"))
        .unwrap();
    assert_eq!(timeout(WAIT, count.next()).await.unwrap().unwrap().unwrap(), 1);
}

#[tokio::test]
async fn resubscribing_starts_from_current_state() {
    let graph = Graph::in_memory().unwrap();
    let modifier: &DataModifier = graph.modifier();

    {
        let mut notes = graph.note_repo().notes();
        let empty = timeout(WAIT, notes.next()).await.unwrap().unwrap().unwrap();
        assert!(empty.is_empty());
    }

    modifier.submit(Modification::create("A", "a")).unwrap();
    modifier.submit(Modification::create("B", "b")).unwrap();

    let mut notes = graph.note_repo().notes();
    let current = timeout(WAIT, notes.next()).await.unwrap().unwrap().unwrap();
    assert_eq!(current.len(), 2);
}

#[tokio::test]
async fn pending_invalidations_coalesce_into_one_emission() {
    let graph = Graph::in_memory().unwrap();
    let mut notes = graph.note_repo().notes();
    timeout(WAIT, notes.next()).await.unwrap().unwrap().unwrap();

    for title in ["A", "B", "C"] {
        graph
            .modifier()
            .submit(Modification::create(title, "x"))
            .unwrap();
    }

    let latest = timeout(WAIT, notes.next()).await.unwrap().unwrap().unwrap();
    assert_eq!(latest.len(), 3);
}

#[tokio::test]
async fn repository_lookup_maps_to_ui_note() {
    let graph = Graph::in_memory().unwrap();
    let outcome = graph
        .modifier()
        .submit(Modification::create("A", "a"))
        .unwrap();
    let notepad_core::ModifyOutcome::Created(id) = outcome else {
        panic!("expected Created");
    };

    let note = graph.note_repo().note(id).unwrap().unwrap();
    assert_eq!(note, notepad_core::UiNote::new(id, "A", "a"));
    assert_eq!(graph.note_repo().note(id + 1).unwrap(), None);
}

#[test]
fn graph_setup_creates_database_file_in_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("notes.db");
    let config = notepad_core::CoreConfig::default().with_db_path(&path);

    let graph = Graph::setup(&config).unwrap();
    graph
        .modifier()
        .submit(Modification::create("A", "a"))
        .unwrap();
    drop(graph);

    assert!(path.exists());
    let dao = notepad_core::SqliteNoteDao::try_new(notepad_core::db::open_db(&path).unwrap())
        .unwrap();
    assert_eq!(dao.count().unwrap(), 1);
}
