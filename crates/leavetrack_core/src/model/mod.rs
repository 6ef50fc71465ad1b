//! Domain model for the leave calendar.
//!
//! # Responsibility
//! - Define the key types shared by the year, team and day-assignment stores.
//! - Keep the persisted (wire) shapes next to their in-memory counterparts.
//!
//! # Invariants
//! - Members are identified by a stable integer `MemberId`, never reused.
//! - Member deletion is a soft-delete flag, not a record removal.

pub mod calendar;
pub mod day;
pub mod member;
pub mod year;
