//! Presentation state holder shared by the declarative and imperative screens.
//!
//! # Responsibility
//! - Fold repository emissions into `NoteListViewState`.
//! - Turn user intents into dialog transitions and modifications.
//!
//! # Invariants
//! - Storage reads happen on the blocking pool via `NoteRepo`; mutations run
//!   on the caller's thread.
//! - At most one collection task is active per view model.
//! - The note cap is checked against storage, not the last emitted list, and
//!   the check and insert of one `Create` are not interleaved with another.
//! - `Create` needs the create dialog open; `Update`/`Delete` need the edit
//!   dialog open on the same note.

use crate::model::note::{NoteId, UiNote};
use crate::modifier::{DataModifier, Modification};
use crate::repo::note_dao::{NoteDao, RepoError, RepoResult, SqliteNoteDao};
use crate::repo::note_repo::NoteRepo;
use crate::viewmodel::intent::{is_not_blank, IntentOutcome, NoteIntent, RejectReason};
use crate::viewmodel::state::{DialogMode, NoteListViewState, MAX_NOTES};
use futures_util::StreamExt;
use log::{debug, error, info};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct NoteListViewModel<D: NoteDao = SqliteNoteDao> {
    repo: NoteRepo<D>,
    modifier: DataModifier<D>,
    state: Arc<watch::Sender<NoteListViewState>>,
    load_task: Mutex<Option<JoinHandle<()>>>,
    create_lock: Mutex<()>,
}

impl<D: NoteDao> NoteListViewModel<D> {
    pub fn new(repo: NoteRepo<D>, modifier: DataModifier<D>) -> Self {
        let (state, _) = watch::channel(NoteListViewState::default());
        Self {
            repo,
            modifier,
            state: Arc::new(state),
            load_task: Mutex::new(None),
            create_lock: Mutex::new(()),
        }
    }

    /// Starts collecting the note list on the current tokio runtime.
    ///
    /// Replaces any previous collection. The first emission clears
    /// `is_loading`.
    ///
    /// # Errors
    /// - Returns `RepoError::Background` when called outside a tokio runtime.
    pub fn load(&self) -> RepoResult<()> {
        let handle = Handle::try_current().map_err(|err| RepoError::Background(err.to_string()))?;
        let mut stream = self.repo.notes();
        let state = Arc::clone(&self.state);

        let task = handle.spawn(async move {
            while let Some(result) = stream.next().await {
                match result {
                    Ok(notes) => {
                        debug!(
                            "event=notes_emitted module=viewmodel count={}",
                            notes.len()
                        );
                        state.send_modify(|current| *current = current.with_notes(notes));
                    }
                    Err(err) => {
                        error!(
                            "event=notes_emitted module=viewmodel status=error error={}",
                            err
                        );
                        break;
                    }
                }
            }
        });

        if let Some(previous) = self.load_task.lock().replace(task) {
            previous.abort();
        }
        info!("event=view_model_load module=viewmodel status=started");
        Ok(())
    }

    /// Stops observing storage. The last state stays readable.
    pub fn stop(&self) {
        if let Some(task) = self.load_task.lock().take() {
            task.abort();
            info!("event=view_model_stop module=viewmodel status=ok");
        }
    }

    /// Subscribes to state changes.
    pub fn state(&self) -> watch::Receiver<NoteListViewState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> NoteListViewState {
        self.state.borrow().clone()
    }

    /// Shows or hides the composition dialog.
    ///
    /// `note_to_edit` selects an edit dialog; it is dropped when hiding.
    pub fn show_note_composition_dialog(&self, should_show: bool, note_to_edit: Option<UiNote>) {
        self.state
            .send_modify(|current| *current = current.with_dialog(should_show, note_to_edit));
    }

    /// Handles one user intent.
    ///
    /// # Errors
    /// - Propagates storage failures from the modifier. The dialog stays open
    ///   in that case.
    pub fn dispatch(&self, intent: NoteIntent) -> RepoResult<IntentOutcome> {
        let current = self.snapshot();
        let outcome = match intent {
            NoteIntent::OpenCreate => match self.creation_block(&current)? {
                Some(reason) => IntentOutcome::Rejected(reason),
                None => {
                    self.show_note_composition_dialog(true, None);
                    IntentOutcome::Applied
                }
            },
            NoteIntent::OpenEdit(note) => {
                self.show_note_composition_dialog(true, Some(note));
                IntentOutcome::Applied
            }
            NoteIntent::Dismiss => {
                self.show_note_composition_dialog(false, None);
                IntentOutcome::Applied
            }
            NoteIntent::Create { title, description } => {
                let _guard = self.create_lock.lock();
                let current = self.snapshot();
                if let Some(reason) = self.creation_block(&current)? {
                    IntentOutcome::Rejected(reason)
                } else if current.dialog() != DialogMode::Create {
                    IntentOutcome::Rejected(RejectReason::NoDialog)
                } else if !is_not_blank(&title) || !is_not_blank(&description) {
                    IntentOutcome::Rejected(RejectReason::BlankField)
                } else {
                    self.submit(Modification::CreateNote { title, description })?
                }
            }
            NoteIntent::Update(note) => {
                if !is_editing(&current, note.id) {
                    IntentOutcome::Rejected(RejectReason::NoDialog)
                } else if !is_not_blank(&note.title) || !is_not_blank(&note.description) {
                    IntentOutcome::Rejected(RejectReason::BlankField)
                } else {
                    self.submit(Modification::UpdateNote(note))?
                }
            }
            NoteIntent::Delete(id) => {
                if is_editing(&current, id) {
                    self.submit(Modification::DeleteNote(id))?
                } else {
                    IntentOutcome::Rejected(RejectReason::NoDialog)
                }
            }
        };

        if let IntentOutcome::Rejected(reason) = outcome {
            info!(
                "event=intent_rejected module=viewmodel reason={:?}",
                reason
            );
        }
        Ok(outcome)
    }

    fn creation_block(&self, current: &NoteListViewState) -> RepoResult<Option<RejectReason>> {
        if current.is_loading {
            return Ok(Some(RejectReason::StillLoading));
        }
        // The emitted list lags behind writes made through this view model.
        let stored = self.repo.count()?;
        if stored >= MAX_NOTES as u64 {
            return Ok(Some(RejectReason::MaximumNotes));
        }
        Ok(None)
    }

    fn submit(&self, modification: Modification) -> RepoResult<IntentOutcome> {
        let outcome = self.modifier.submit(modification)?;
        self.show_note_composition_dialog(false, None);
        Ok(IntentOutcome::Submitted(outcome))
    }
}

impl<D: NoteDao> Drop for NoteListViewModel<D> {
    fn drop(&mut self) {
        if let Some(task) = self.load_task.get_mut().take() {
            task.abort();
        }
    }
}

fn is_editing(state: &NoteListViewState, id: NoteId) -> bool {
    matches!(state.dialog(), DialogMode::Edit(target) if target.id == id)
}
