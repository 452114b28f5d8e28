//! Core of the Notepad sample: local note storage, the write path, and the
//! view state shared by the declarative and imperative presentations.
//!
//! Data flows one way: a modification mutates storage, storage invalidates
//! live queries, the repository maps rows to `UiNote`s, the view model folds
//! them into `NoteListViewState`, and a presentation re-renders.

pub mod config;
pub mod db;
pub mod graph;
pub mod logging;
pub mod model;
pub mod modifier;
pub mod repo;
pub mod view;
pub mod viewmodel;

pub use config::CoreConfig;
pub use graph::Graph;
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget,
};
pub use model::note::{Note, NoteId, UiNote};
pub use modifier::{DataModifier, Modification, ModifyOutcome};
pub use repo::note_dao::{NoteDao, RepoError, RepoResult, SqliteNoteDao};
pub use repo::note_repo::{NoteCountStream, NoteRepo, NotesStream};
pub use viewmodel::{
    DialogMode, IntentOutcome, NoteForm, NoteIntent, NoteListViewModel, NoteListViewState,
    RejectReason, MAX_NOTES,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
