//! Persistence adapter: the sole gateway to durable storage.
//!
//! # Invariants
//! - All operations are synchronous; a write is visible to the next read.
//! - Repositories store opaque strings and never interpret record shapes.

pub mod kv_repo;
