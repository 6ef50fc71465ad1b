//! Year key type.

/// Four-digit calendar year used as the top-level key everywhere.
pub type Year = i32;

/// Years tracked when nothing has been persisted yet.
pub const DEFAULT_YEARS: [Year; 2] = [2025, 2026];

/// Sorts ascending and drops duplicates in place.
pub(crate) fn normalize_years(years: &mut Vec<Year>) {
    years.sort_unstable();
    years.dedup();
}
