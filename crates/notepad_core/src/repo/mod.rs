//! Storage accessor, live queries and the read-path repository.
//!
//! # Responsibility
//! - Keep SQL inside the accessor (`note_dao`).
//! - Expose storage changes as restartable streams (`query`, `note_repo`).

pub mod note_dao;
pub mod note_repo;
pub mod query;
