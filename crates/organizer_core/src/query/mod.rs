//! Read-side projections over store snapshots.
//!
//! # Invariants
//! - Every function here takes borrowed slices and returns fresh values.
//! - "Today" is always an explicit argument, never read from the clock.

pub mod calendar;
pub mod dashboard;
pub mod note_query;
pub mod task_query;
