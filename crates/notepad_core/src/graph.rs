//! Dependency graph wiring storage, repository and modifier.
//!
//! # Invariants
//! - One graph owns one database connection; every service built from it
//!   shares that connection and its change signal.
//! - Services are created lazily on first use and then reused.

use crate::config::CoreConfig;
use crate::db::{open_db, open_db_in_memory};
use crate::modifier::DataModifier;
use crate::repo::note_dao::{RepoResult, SqliteNoteDao};
use crate::repo::note_repo::NoteRepo;
use crate::viewmodel::NoteListViewModel;
use log::info;
use once_cell::sync::OnceCell;

pub struct Graph {
    dao: SqliteNoteDao,
    note_repo: OnceCell<NoteRepo>,
    modifier: OnceCell<DataModifier>,
}

impl Graph {
    /// Opens the configured database and prepares lazy services.
    pub fn setup(config: &CoreConfig) -> RepoResult<Self> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = open_db(&config.db_path)?;
        info!(
            "event=graph_setup module=graph status=ok db_path={}",
            config.db_path.display()
        );
        Ok(Self::from_dao(SqliteNoteDao::try_new(conn)?))
    }

    /// Builds a graph over a private in-memory database.
    pub fn in_memory() -> RepoResult<Self> {
        Ok(Self::from_dao(SqliteNoteDao::try_new(open_db_in_memory()?)?))
    }

    fn from_dao(dao: SqliteNoteDao) -> Self {
        Self {
            dao,
            note_repo: OnceCell::new(),
            modifier: OnceCell::new(),
        }
    }

    pub fn note_repo(&self) -> &NoteRepo {
        self.note_repo.get_or_init(|| NoteRepo::new(self.dao.clone()))
    }

    pub fn modifier(&self) -> &DataModifier {
        self.modifier.get_or_init(|| DataModifier::new(self.dao.clone()))
    }

    /// Creates a fresh view model over this graph's services.
    pub fn note_list_view_model(&self) -> NoteListViewModel {
        NoteListViewModel::new(self.note_repo().clone(), self.modifier().clone())
    }
}
