//! Calendar labels and month arithmetic used by the grid views.
//!
//! Labels are French to match the stored keys (`annees`, `equipe`, `jours`).

use super::day::{Day, MonthIndex};
use super::year::Year;

/// Month names indexed by `MonthIndex`.
pub const MONTH_NAMES: [&str; 12] = [
    "Janvier",
    "Février",
    "Mars",
    "Avril",
    "Mai",
    "Juin",
    "Juillet",
    "Août",
    "Septembre",
    "Octobre",
    "Novembre",
    "Décembre",
];

/// Short weekday names, Sunday first.
pub const WEEKDAY_SHORT_NAMES: [&str; 7] = ["Dim", "Lun", "Mar", "Mer", "Jeu", "Ven", "Sam"];

/// Returns the month label, or `None` outside `0..=11`.
pub fn month_name(month: MonthIndex) -> Option<&'static str> {
    MONTH_NAMES.get(usize::from(month)).copied()
}

/// Returns the weekday label for `0` (Sunday) to `6` (Saturday).
pub fn weekday_short_name(weekday: u8) -> Option<&'static str> {
    WEEKDAY_SHORT_NAMES.get(usize::from(weekday)).copied()
}

/// `(index, name)` pairs for month pickers.
pub fn months_with_index() -> impl Iterator<Item = (MonthIndex, &'static str)> {
    (0u8..).zip(MONTH_NAMES)
}

/// Number of days in `month` of `year` (Gregorian), or `None` for a bad index.
pub fn days_in_month(year: Year, month: MonthIndex) -> Option<Day> {
    let days = match month {
        0 | 2 | 4 | 6 | 7 | 9 | 11 => 31,
        3 | 5 | 8 | 10 => 30,
        1 if is_leap_year(year) => 29,
        1 => 28,
        _ => return None,
    };
    Some(days)
}

fn is_leap_year(year: Year) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
