//! Toolkit-free presentation models.
//!
//! - `screen`: declarative; the whole screen is recomputed from state.
//! - `adapter`: imperative; a list adapter and a binder mutate bindings in
//!   place.

pub mod adapter;
pub mod screen;

pub const FAB_LABEL_ADD: &str = "Add New Note";
pub const FAB_LABEL_MAXIMUM: &str = "Maximum Notes";
pub const DIALOG_TITLE_CREATE: &str = "New Note";
pub const DIALOG_TITLE_UPDATE: &str = "Update Note";
pub const CONFIRM_LABEL_CREATE: &str = "Create";
pub const CONFIRM_LABEL_UPDATE: &str = "Update";
pub const DELETE_LABEL: &str = "Delete";
pub const EMPTY_TEXT: &str = "No notes";
