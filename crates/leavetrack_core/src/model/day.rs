//! Day-assignment key and value types.
//!
//! A day assignment is addressed by `(year, member_id, month_index, day)`.
//! No calendar-validity check happens here: callers only address real dates.

/// Zero-based month index, `0` = January ... `11` = December.
pub type MonthIndex = u8;

/// One-based day of month, `1..=31`.
pub type Day = u8;

/// Opaque day-type token such as `CP`, `Fe` or `1/2Arr`.
///
/// Tokens are not checked against any registry of known day types.
pub type DayTypeId = String;
