//! Core use-case services.
//!
//! # Responsibility
//! - Own the live record collections and their persistence.
//! - Keep presentation layers decoupled from storage details.

pub mod daily_marks;
pub mod focus_timer;
pub mod preferences;
pub mod record_store;
