//! View state, user intents and the view model driving both presentations.
//!
//! # Invariants
//! - Data flows one way: storage mutation, repository emission, state
//!   update, re-render.

mod intent;
mod state;
mod view_model;

pub use intent::{IntentOutcome, NoteForm, NoteIntent, RejectReason};
pub use state::{DialogMode, NoteListViewState, MAX_NOTES};
pub use view_model::NoteListViewModel;
