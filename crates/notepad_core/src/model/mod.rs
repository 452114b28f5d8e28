//! Domain model for persisted notes and their view-facing projection.
//!
//! # Invariants
//! - Every note is identified by a storage-assigned `NoteId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod note;
