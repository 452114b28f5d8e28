//! Single write path from user intents to storage mutations.
//!
//! # Invariants
//! - All note mutations go through `DataModifier::submit`.
//! - The modifier does not validate input; see `viewmodel` for the rules the
//!   presentations enforce.

mod data_modifier;
mod modification;

pub use data_modifier::{DataModifier, ModifyOutcome};
pub use modification::Modification;
