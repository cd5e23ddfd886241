//! Occurrences delivered by the host.
//!
//! An occurrence borrows the objects it affects for the duration of one
//! [`EventRouter::route`](crate::EventRouter::route) call; the router writes
//! updated lore straight back through those borrows.

mod occurrence;

pub use occurrence::{BlockPos, Occurrence, OccurrenceKey, OccurrenceKind};
