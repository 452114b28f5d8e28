#![allow(dead_code)]

use notepad_core::NoteListViewState;
use std::time::Duration;
use tokio::sync::watch;

pub const WAIT: Duration = Duration::from_secs(5);

/// Waits until the view state satisfies `predicate` and returns a copy.
pub async fn wait_for_state(
    rx: &mut watch::Receiver<NoteListViewState>,
    predicate: impl FnMut(&NoteListViewState) -> bool,
) -> NoteListViewState {
    let state = tokio::time::timeout(WAIT, rx.wait_for(predicate))
        .await
        .expect("timed out waiting for view state")
        .expect("view state channel closed");
    (*state).clone()
}

pub fn titles(state: &NoteListViewState) -> Vec<&str> {
    state.notes.iter().map(|note| note.title.as_str()).collect()
}
