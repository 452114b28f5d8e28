use crate::model::note::{Note, NoteId};
use crate::modifier::Modification;
use crate::repo::note_dao::{NoteDao, RepoResult, SqliteNoteDao};
use log::{error, info};
use std::time::Instant;

/// Result of one applied modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifyOutcome {
    Created(NoteId),
    Updated,
    Deleted,
}

/// Dispatches modifications to the note accessor.
#[derive(Clone)]
pub struct DataModifier<D: NoteDao = SqliteNoteDao> {
    dao: D,
}

impl<D: NoteDao> DataModifier<D> {
    pub fn new(dao: D) -> Self {
        Self { dao }
    }

    /// Applies one modification synchronously on the calling thread.
    ///
    /// Updates and deletes of unknown ids succeed without effect.
    pub fn submit(&self, modification: Modification) -> RepoResult<ModifyOutcome> {
        let started_at = Instant::now();
        let kind = modification.kind();
        let result = match modification {
            Modification::CreateNote { title, description } => self
                .dao
                .insert(title.as_str(), description.as_str())
                .map(ModifyOutcome::Created),
            Modification::UpdateNote(note) => self
                .dao
                .update(&Note::from(note))
                .map(|()| ModifyOutcome::Updated),
            Modification::DeleteNote(id) => {
                self.dao.delete(id).map(|()| ModifyOutcome::Deleted)
            }
        };

        match &result {
            Ok(_) => info!(
                "event=modify module=modifier status=ok kind={} duration_ms={}",
                kind,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=modify module=modifier status=error kind={} duration_ms={} error={}",
                kind,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}
