//! Read-path repository for view-facing notes.
//!
//! # Responsibility
//! - Map persisted `Note` rows to `UiNote` values.
//! - Forward storage invalidations as live streams.
//!
//! # Invariants
//! - List order is storage order; the repository never re-sorts.

use crate::model::note::{NoteId, UiNote};
use crate::repo::note_dao::{NoteDao, RepoResult, SqliteNoteDao};
use crate::repo::query::observe;
use futures_util::stream::BoxStream;

/// Live stream of view-facing note lists.
pub type NotesStream = BoxStream<'static, RepoResult<Vec<UiNote>>>;
/// Live stream of note counts.
pub type NoteCountStream = BoxStream<'static, RepoResult<u64>>;

/// Repository over a note accessor.
#[derive(Clone)]
pub struct NoteRepo<D: NoteDao = SqliteNoteDao> {
    dao: D,
}

impl<D: NoteDao> NoteRepo<D> {
    pub fn new(dao: D) -> Self {
        Self { dao }
    }

    /// Observes the full note list.
    ///
    /// Each call starts an independent subscription that first emits the
    /// current list.
    pub fn notes(&self) -> NotesStream {
        observe(self.dao.clone(), |dao: &D| {
            Ok(dao.select_all()?.into_iter().map(UiNote::from).collect())
        })
    }

    /// Observes the number of stored notes.
    pub fn note_count(&self) -> NoteCountStream {
        observe(self.dao.clone(), |dao: &D| dao.count())
    }

    /// Current number of stored notes, read directly from storage.
    pub fn count(&self) -> RepoResult<u64> {
        self.dao.count()
    }

    /// Looks up one note without subscribing.
    pub fn note(&self, id: NoteId) -> RepoResult<Option<UiNote>> {
        Ok(self.dao.select_by_id(id)?.map(UiNote::from))
    }
}
