//! Tracker stores and the context that wires them together.
//!
//! # Responsibility
//! - Implement year, team and day-assignment use-cases over `KvRepository`.
//! - Keep callers (views, FFI, import) decoupled from storage encoding.
//!
//! # Invariants
//! - Mutations are write-through: change memory, then persist the whole store.

pub mod day_assignments;
pub mod team_registry;
pub mod tracker;
pub mod year_registry;
