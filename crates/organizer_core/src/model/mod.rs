//! Record shapes owned by the record store.
//!
//! # Responsibility
//! - Define tasks, notes and habits exactly as they are persisted.
//! - Provide construction-time validation for user-supplied fields.
//!
//! # Invariants
//! - Every record carries an immutable `RecordId`.
//! - Serialized field names are camelCase.

pub mod deadline;
pub mod habit;
pub mod note;
pub mod task;
pub mod validation;

/// Identifier shared by every record kind.
///
/// Derived from creation time in epoch milliseconds; seeded habits use 1..=5.
pub type RecordId = i64;
