//! Persistence boundary for tracker stores.
//!
//! # Responsibility
//! - Define the key-value contract every store persists through.
//! - Keep SQL and JSON encoding details out of the store logic.
//!
//! # Invariants
//! - A stored value is always a complete serialized store, never a delta.
//! - Non-parseable stored values surface as errors instead of being masked.

pub mod kv_repo;
