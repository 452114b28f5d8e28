//! FFI use-case API for a declarative Flutter note screen.
//!
//! # Responsibility
//! - Own one screen session (database, view model, background runtime).
//! - Hand the UI full render snapshots and accept user intents.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - At most one screen session exists per process.
//! - Intents run synchronously on the calling thread; list updates arrive
//!   asynchronously and show up in the next `note_screen_render`.

use log::{info, warn};
use notepad_core::view::screen::{render, FabStyle, NoteListBody, NoteScreen};
use notepad_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CoreConfig, Graph, IntentOutcome, ModifyOutcome, NoteIntent, NoteListViewModel,
    NoteListViewState, UiNote,
};
use parking_lot::Mutex;
use std::path::PathBuf;
use tokio::runtime::{Builder, Runtime};

static SESSION: Mutex<Option<ScreenSession>> = parking_lot::const_mutex(None);

struct ScreenSession {
    // Field order is drop order: stop collection before the runtime goes away.
    view_model: NoteListViewModel,
    _graph: Graph,
    _runtime: Runtime,
    db_path: PathBuf,
}

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes rolling-file logging once per process.
///
/// # FFI contract
/// - `level`: `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path.
/// - Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One rendered note card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItemView {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// Floating "new note" button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FabView {
    pub label: String,
    pub enabled: bool,
    /// Render with the error palette.
    pub is_error: bool,
}

/// Composition dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub title: String,
    pub confirm_label: String,
    pub initial_title: String,
    pub initial_description: String,
    /// Set for edit dialogs.
    pub editing_id: Option<i64>,
    pub show_delete: bool,
}

/// Full screen snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteScreenView {
    pub app_bar_title: String,
    pub is_loading: bool,
    /// Placeholder text for an empty list.
    pub empty_text: Option<String>,
    pub items: Vec<NoteItemView>,
    pub fab: Option<FabView>,
    pub dialog: Option<DialogView>,
}

/// Generic action response envelope for intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    pub ok: bool,
    /// Created note id, when the action created one.
    pub note_id: Option<i64>,
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note_id: Option<i64>) -> Self {
        Self {
            ok: true,
            note_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Opens the note database and starts observing it.
///
/// # FFI contract
/// - `db_path`: database file; `None` falls back to `NOTEPAD_DB_PATH` or the
///   temp-dir default.
/// - Idempotent for the same path; a different path while running is an error.
/// - Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn note_screen_start(db_path: Option<String>) -> String {
    let mut config = CoreConfig::from_env();
    if let Some(path) = db_path.map(|raw| raw.trim().to_string()) {
        if !path.is_empty() {
            config = config.with_db_path(path);
        }
    }

    let mut session = SESSION.lock();
    if let Some(active) = session.as_ref() {
        if active.db_path == config.db_path {
            return String::new();
        }
        return format!(
            "note screen already started at `{}`; refusing to switch to `{}`",
            active.db_path.display(),
            config.db_path.display()
        );
    }

    match start_session(config) {
        Ok(started) => {
            *session = Some(started);
            String::new()
        }
        Err(err) => {
            warn!("event=ffi_screen_start module=ffi status=error error={err}");
            err
        }
    }
}

/// Stops observing and closes the database. Safe to call when not started.
#[flutter_rust_bridge::frb(sync)]
pub fn note_screen_stop() {
    if let Some(session) = SESSION.lock().take() {
        session.view_model.stop();
        info!("event=ffi_screen_stop module=ffi status=ok");
    }
}

/// Renders the current screen.
///
/// Before `note_screen_start`, this is the loading screen.
#[flutter_rust_bridge::frb(sync)]
pub fn note_screen_render() -> NoteScreenView {
    let state = with_session(|session| session.view_model.snapshot()).unwrap_or_default();
    to_screen_view(&state, render(&state))
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_screen_open_create() -> NoteActionResponse {
    dispatch(NoteIntent::OpenCreate, "Dialog opened.")
}

/// Opens the edit dialog for a note currently on screen.
#[flutter_rust_bridge::frb(sync)]
pub fn note_screen_open_edit(id: i64) -> NoteActionResponse {
    let note = with_session(|session| {
        session
            .view_model
            .snapshot()
            .notes
            .into_iter()
            .find(|note| note.id == id)
    });
    match note {
        None => NoteActionResponse::failure("note screen is not started"),
        Some(None) => NoteActionResponse::failure(format!("note {id} is not on screen")),
        Some(Some(note)) => dispatch(NoteIntent::OpenEdit(note), "Dialog opened."),
    }
}

/// Confirms the open "New Note" dialog.
///
/// Fails without touching storage unless `note_screen_open_create` succeeded
/// first, and once five notes are stored.
#[flutter_rust_bridge::frb(sync)]
pub fn note_screen_create(title: String, description: String) -> NoteActionResponse {
    dispatch(NoteIntent::Create { title, description }, "Note created.")
}

/// Confirms the edit dialog opened for `id`.
#[flutter_rust_bridge::frb(sync)]
pub fn note_screen_update(id: i64, title: String, description: String) -> NoteActionResponse {
    dispatch(
        NoteIntent::Update(UiNote::new(id, title, description)),
        "Note updated.",
    )
}

/// Deletes the note whose edit dialog is open.
#[flutter_rust_bridge::frb(sync)]
pub fn note_screen_delete(id: i64) -> NoteActionResponse {
    dispatch(NoteIntent::Delete(id), "Note deleted.")
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_screen_dismiss() -> NoteActionResponse {
    dispatch(NoteIntent::Dismiss, "Dialog dismissed.")
}

fn start_session(config: CoreConfig) -> Result<ScreenSession, String> {
    let runtime = Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("notepad-screen")
        .build()
        .map_err(|err| format!("note screen runtime failed: {err}"))?;
    let graph =
        Graph::setup(&config).map_err(|err| format!("note screen DB open failed: {err}"))?;
    let view_model = graph.note_list_view_model();
    {
        let _entered = runtime.enter();
        view_model
            .load()
            .map_err(|err| format!("note screen load failed: {err}"))?;
    }
    info!(
        "event=ffi_screen_start module=ffi status=ok db_path={}",
        config.db_path.display()
    );

    Ok(ScreenSession {
        view_model,
        _graph: graph,
        _runtime: runtime,
        db_path: config.db_path,
    })
}

fn with_session<T>(f: impl FnOnce(&ScreenSession) -> T) -> Option<T> {
    SESSION.lock().as_ref().map(f)
}

fn dispatch(intent: NoteIntent, success_message: &str) -> NoteActionResponse {
    match with_session(|session| session.view_model.dispatch(intent)) {
        None => NoteActionResponse::failure("note screen is not started"),
        Some(Err(err)) => NoteActionResponse::failure(format!("note screen intent failed: {err}")),
        Some(Ok(IntentOutcome::Rejected(reason))) => {
            NoteActionResponse::failure(reason.to_string())
        }
        Some(Ok(IntentOutcome::Submitted(ModifyOutcome::Created(id)))) => {
            NoteActionResponse::success(success_message, Some(id))
        }
        Some(Ok(_)) => NoteActionResponse::success(success_message, None),
    }
}

fn to_screen_view(state: &NoteListViewState, screen: NoteScreen) -> NoteScreenView {
    let (empty_text, items) = match screen.body {
        NoteListBody::Loading => (None, Vec::new()),
        NoteListBody::Empty { text } => (Some(text.to_string()), Vec::new()),
        NoteListBody::Items(items) => (
            None,
            items
                .into_iter()
                .map(|item| NoteItemView {
                    id: item.note.id,
                    title: item.note.title,
                    description: item.note.description,
                })
                .collect(),
        ),
    };

    NoteScreenView {
        app_bar_title: screen.app_bar_title.to_string(),
        is_loading: state.is_loading,
        empty_text,
        items,
        fab: screen.fab.map(|fab| FabView {
            label: fab.label.to_string(),
            enabled: fab.enabled,
            is_error: fab.style == FabStyle::Error,
        }),
        dialog: screen.dialog.map(|dialog| DialogView {
            title: dialog.title.to_string(),
            confirm_label: dialog.confirm_label.to_string(),
            show_delete: dialog.shows_delete(),
            editing_id: dialog.editing,
            initial_title: dialog.form.title,
            initial_description: dialog.form.description,
        }),
    }
}
