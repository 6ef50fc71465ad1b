//! Core domain logic for the leave calendar tracker.
//! This crate is the single source of truth for year, team and day-assignment
//! invariants; views, import and FFI layers call into it.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::calendar::{days_in_month, month_name, months_with_index, weekday_short_name};
pub use model::day::{Day, DayTypeId, MonthIndex};
pub use model::member::{Member, MemberId, StoredMember};
pub use model::year::{Year, DEFAULT_YEARS};
pub use repo::kv_repo::{
    load_json, save_json, KvRepository, RepoError, RepoResult, SqliteKvRepository, DAYS_KEY,
    TEAM_KEY, YEARS_KEY,
};
pub use service::day_assignments::{DayAssignmentStore, MonthAssignments};
pub use service::team_registry::{AddMemberOutcome, TeamRegistry};
pub use service::tracker::LeaveTracker;
pub use service::year_registry::YearRegistry;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
