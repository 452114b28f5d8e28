//! Note storage accessor contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide typed create/update/delete/select queries over the `notes` table.
//! - Publish an invalidation signal after every mutation so live queries can
//!   re-run.
//!
//! # Invariants
//! - The accessor performs no validation: empty fields and any number of rows
//!   are accepted. Validation belongs to the presentation layer.
//! - `update` and `delete` on a missing id are silent no-ops.
//! - Every mutation call bumps the change counter, even when no row matched.

use crate::db::DbError;
use crate::model::note::{Note, NoteId};
use log::debug;
use parking_lot::Mutex;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tokio::sync::watch;

const NOTE_SELECT_SQL: &str = "SELECT id, title, description FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Io(std::io::Error),
    InvalidData(String),
    /// A query scheduled on the blocking pool did not complete.
    Background(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
            Self::Background(message) => write!(f, "background query failed: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::InvalidData(_) | Self::Background(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage accessor interface for the `notes` table.
pub trait NoteDao: Clone + Send + Sync + 'static {
    /// Inserts one note and returns its storage-assigned id.
    fn insert(&self, title: &str, description: &str) -> RepoResult<NoteId>;
    /// Replaces title and description of the row with `note.id`.
    fn update(&self, note: &Note) -> RepoResult<()>;
    /// Deletes the row with `id`.
    fn delete(&self, id: NoteId) -> RepoResult<()>;
    /// Returns all notes in storage order.
    fn select_all(&self) -> RepoResult<Vec<Note>>;
    fn select_by_id(&self, id: NoteId) -> RepoResult<Option<Note>>;
    fn count(&self) -> RepoResult<u64>;
    /// Subscribes to the invalidation counter bumped by every mutation.
    fn changes(&self) -> watch::Receiver<u64>;
}

/// SQLite-backed note accessor sharing one connection across clones.
#[derive(Clone)]
pub struct SqliteNoteDao {
    conn: Arc<Mutex<Connection>>,
    changes: Arc<watch::Sender<u64>>,
}

impl SqliteNoteDao {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - Returns `InvalidData` when the `notes` table is missing, which means
    ///   the connection did not come from `open_db`/`open_db_in_memory`.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        if !notes_table_exists(&conn)? {
            return Err(RepoError::InvalidData(
                "missing required table `notes`".to_string(),
            ));
        }

        let (changes, _) = watch::channel(0);
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            changes: Arc::new(changes),
        })
    }

    fn notify_changed(&self, query: &'static str) {
        self.changes.send_modify(|version| *version = version.wrapping_add(1));
        debug!(
            "event=notes_invalidated module=repo query={} version={}",
            query,
            *self.changes.borrow()
        );
    }
}

impl NoteDao for SqliteNoteDao {
    fn insert(&self, title: &str, description: &str) -> RepoResult<NoteId> {
        let id = {
            let conn = self.conn.lock();
            conn.execute(
                "INSERT INTO notes (title, description) VALUES (?1, ?2);",
                params![title, description],
            )?;
            conn.last_insert_rowid()
        };
        self.notify_changed("insert");
        Ok(id)
    }

    fn update(&self, note: &Note) -> RepoResult<()> {
        self.conn.lock().execute(
            "UPDATE notes SET title = ?1, description = ?2 WHERE id = ?3;",
            params![note.title.as_str(), note.description.as_str(), note.id],
        )?;
        self.notify_changed("update");
        Ok(())
    }

    fn delete(&self, id: NoteId) -> RepoResult<()> {
        self.conn
            .lock()
            .execute("DELETE FROM notes WHERE id = ?1;", [id])?;
        self.notify_changed("delete");
        Ok(())
    }

    fn select_all(&self) -> RepoResult<Vec<Note>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!("{NOTE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn select_by_id(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_note_row(row)?)),
            None => Ok(None),
        }
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .lock()
            .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative note count `{count}`")))
    }

    fn changes(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    Ok(Note {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
    })
}

fn notes_table_exists(conn: &Connection) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'notes'
        );",
        [],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
