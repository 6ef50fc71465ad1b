//! FFI use-case API for the Flutter calendar views.
//!
//! # Responsibility
//! - Expose year, team and day-assignment operations to Dart via FRB.
//! - Translate core errors into simple response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Each call opens the tracker database, loads the stores, performs one
//!   operation and returns; the UI thread is the only caller.

use leavetrack_core::db::open_db;
use leavetrack_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    LeaveTracker, Member, RepoResult, SqliteKvRepository,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "leavetrack.sqlite3";
const DB_PATH_ENV: &str = "LEAVETRACK_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the tracker database location for this process.
///
/// Must run before the first data call; later calls with the same path are
/// accepted, a different path is rejected. Returns an empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "db path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = DB_PATH.get_or_init(|| requested.clone());
    if *active != requested {
        return format!(
            "db path already set to `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        );
    }
    String::new()
}

/// Generic envelope for write operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation ran without error.
    pub ok: bool,
    /// Whether state actually changed (`false` for no-ops).
    pub changed: bool,
    /// Member id created or reactivated by `add_member`.
    pub member_id: Option<i64>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(changed: bool, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            changed,
            member_id: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            changed: false,
            member_id: None,
            message: message.into(),
        }
    }
}

/// Tracked years, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearsResponse {
    pub ok: bool,
    pub years: Vec<i32>,
    pub message: String,
}

/// Team member as seen by the views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberItem {
    pub id: i64,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembersResponse {
    pub ok: bool,
    pub items: Vec<MemberItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTypeResponse {
    pub ok: bool,
    /// `None` when the person-day has no assignment.
    pub type_id: Option<String>,
    pub message: String,
}

/// One assigned day inside a month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAssignmentItem {
    pub day: u8,
    pub type_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthAssignmentsResponse {
    pub ok: bool,
    /// Sorted by day ascending.
    pub items: Vec<DayAssignmentItem>,
    pub message: String,
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_years() -> YearsResponse {
    match with_tracker(|tracker| Ok(tracker.years().years().to_vec())) {
        Ok(years) => YearsResponse {
            ok: true,
            message: format!("{} year(s).", years.len()),
            years,
        },
        Err(err) => YearsResponse {
            ok: false,
            years: Vec::new(),
            message: format!("list_years failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn add_year(year: i32) -> ActionResponse {
    match with_tracker(|tracker| tracker.years_mut().add_year(year)) {
        Ok(true) => ActionResponse::success(true, "Year added."),
        Ok(false) => ActionResponse::success(false, "Year already tracked."),
        Err(err) => ActionResponse::failure(format!("add_year failed: {err}")),
    }
}

/// Removes a year and every day assignment recorded under it.
#[flutter_rust_bridge::frb(sync)]
pub fn remove_year(year: i32) -> ActionResponse {
    match with_tracker(|tracker| tracker.remove_year(year)) {
        Ok(changed) => ActionResponse::success(changed, "Year removed."),
        Err(err) => ActionResponse::failure(format!("remove_year failed: {err}")),
    }
}

/// Lists members; removed members are included only on request.
#[flutter_rust_bridge::frb(sync)]
pub fn list_members(include_inactive: bool) -> MembersResponse {
    let result = with_tracker(|tracker| {
        let items = tracker
            .team()
            .members()
            .iter()
            .filter(|member| include_inactive || member.active)
            .map(to_member_item)
            .collect::<Vec<_>>();
        Ok(items)
    });
    match result {
        Ok(items) => MembersResponse {
            ok: true,
            message: format!("{} member(s).", items.len()),
            items,
        },
        Err(err) => MembersResponse {
            ok: false,
            items: Vec::new(),
            message: format!("list_members failed: {err}"),
        },
    }
}

/// Adds a member, or reactivates the removed member with the same name.
#[flutter_rust_bridge::frb(sync)]
pub fn add_member(name: String) -> ActionResponse {
    if name.trim().is_empty() {
        return ActionResponse::failure("add_member failed: member name cannot be empty");
    }
    match with_tracker(|tracker| tracker.team_mut().add_member(&name)) {
        Ok(outcome) => {
            let message = if outcome.changed() {
                "Member saved."
            } else {
                "Member already active."
            };
            ActionResponse {
                member_id: Some(outcome.id()),
                ..ActionResponse::success(outcome.changed(), message)
            }
        }
        Err(err) => ActionResponse::failure(format!("add_member failed: {err}")),
    }
}

/// Soft-deletes a member; day assignments are kept.
#[flutter_rust_bridge::frb(sync)]
pub fn remove_member(member_id: i64) -> ActionResponse {
    match with_tracker(|tracker| tracker.team_mut().remove_member(member_id)) {
        Ok(true) => ActionResponse::success(true, "Member removed."),
        Ok(false) => ActionResponse::success(false, "Member not found or already removed."),
        Err(err) => ActionResponse::failure(format!("remove_member failed: {err}")),
    }
}

/// Replaces the whole team with an already-parsed import.
#[flutter_rust_bridge::frb(sync)]
pub fn replace_members(items: Vec<MemberItem>) -> ActionResponse {
    let members = items
        .into_iter()
        .map(|item| Member {
            id: item.id,
            name: item.name,
            active: item.active,
        })
        .collect::<Vec<_>>();
    match with_tracker(|tracker| tracker.team_mut().replace_all(members)) {
        Ok(()) => ActionResponse::success(true, "Team replaced."),
        Err(err) => ActionResponse::failure(format!("replace_members failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn get_day_type(year: i32, member_id: i64, month: u8, day: u8) -> DayTypeResponse {
    let result = with_tracker(|tracker| {
        Ok(tracker
            .days()
            .get_day_type(year, member_id, month, day)
            .map(str::to_owned))
    });
    match result {
        Ok(type_id) => DayTypeResponse {
            ok: true,
            type_id,
            message: String::new(),
        },
        Err(err) => DayTypeResponse {
            ok: false,
            type_id: None,
            message: format!("get_day_type failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn set_day_type(
    year: i32,
    member_id: i64,
    month: u8,
    day: u8,
    type_id: String,
) -> ActionResponse {
    if type_id.trim().is_empty() {
        return ActionResponse::failure("set_day_type failed: day type cannot be empty");
    }
    match with_tracker(|tracker| {
        tracker
            .days_mut()
            .set_day_type(year, member_id, month, day, type_id)
    }) {
        Ok(()) => ActionResponse::success(true, "Day type saved."),
        Err(err) => ActionResponse::failure(format!("set_day_type failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn clear_day_type(year: i32, member_id: i64, month: u8, day: u8) -> ActionResponse {
    match with_tracker(|tracker| {
        tracker
            .days_mut()
            .clear_day_type(year, member_id, month, day)
    }) {
        Ok(changed) => ActionResponse::success(changed, "Day type cleared."),
        Err(err) => ActionResponse::failure(format!("clear_day_type failed: {err}")),
    }
}

/// Returns the assigned days of one member's month, sorted by day.
#[flutter_rust_bridge::frb(sync)]
pub fn month_assignments(year: i32, member_id: i64, month: u8) -> MonthAssignmentsResponse {
    let result = with_tracker(|tracker| {
        let items = tracker
            .days()
            .month_assignments(year, member_id, month)
            .into_iter()
            .map(|(day, type_id)| DayAssignmentItem { day, type_id })
            .collect::<Vec<_>>();
        Ok(items)
    });
    match result {
        Ok(items) => MonthAssignmentsResponse {
            ok: true,
            items,
            message: String::new(),
        },
        Err(err) => MonthAssignmentsResponse {
            ok: false,
            items: Vec::new(),
            message: format!("month_assignments failed: {err}"),
        },
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_tracker<T>(
    f: impl FnOnce(&mut LeaveTracker<SqliteKvRepository<'_>>) -> RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("tracker DB open failed: {err}"))?;
    let repo = SqliteKvRepository::try_new(&conn)
        .map_err(|err| format!("tracker repo init failed: {err}"))?;
    let mut tracker =
        LeaveTracker::load(repo).map_err(|err| format!("tracker load failed: {err}"))?;
    f(&mut tracker).map_err(|err| {
        warn!("event=ffi_call module=ffi status=error error={err}");
        err.to_string()
    })
}

fn to_member_item(member: &Member) -> MemberItem {
    MemberItem {
        id: member.id,
        name: member.name.clone(),
        active: member.active,
    }
}
