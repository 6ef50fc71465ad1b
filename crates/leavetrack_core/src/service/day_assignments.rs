//! Nested day-assignment store.
//!
//! # Responsibility
//! - Map `year -> member -> month -> day -> day type` and mirror it under `jours`.
//! - Provide the cascade cleanup used when a year is removed.
//!
//! # Invariants
//! - Intermediate levels are created lazily, one get-or-create per level.
//! - Missing levels read as "no assignment", never as an error.
//! - The stored document never keeps empty intermediate objects.
//! - Every mutation that changes state persists the whole structure.

use crate::model::day::{Day, DayTypeId, MonthIndex};
use crate::model::member::MemberId;
use crate::model::year::Year;
use crate::repo::kv_repo::{load_json, save_json, KvRepository, RepoResult, DAYS_KEY};
use log::{debug, info};
use std::collections::BTreeMap;

/// Day number -> day-type token for one member and month.
pub type MonthAssignments = BTreeMap<Day, DayTypeId>;
type MemberMonths = BTreeMap<MonthIndex, MonthAssignments>;
type YearMembers = BTreeMap<MemberId, MemberMonths>;
type AssignmentTree = BTreeMap<Year, YearMembers>;

/// Day assignments for all years and members, mirrored to the key-value medium.
pub struct DayAssignmentStore<R: KvRepository> {
    repo: R,
    tree: AssignmentTree,
}

impl<R: KvRepository> DayAssignmentStore<R> {
    /// Loads the stored tree, or starts empty when nothing is stored.
    pub fn load(repo: R) -> RepoResult<Self> {
        let tree = load_json::<AssignmentTree, _>(&repo, DAYS_KEY)?.unwrap_or_default();
        Ok(Self { repo, tree })
    }

    /// Returns the token at the full key path, or `None` when any level is missing.
    ///
    /// An empty stored token reads as `None`.
    pub fn get_day_type(
        &self,
        year: Year,
        member_id: MemberId,
        month: MonthIndex,
        day: Day,
    ) -> Option<&str> {
        self.tree
            .get(&year)?
            .get(&member_id)?
            .get(&month)?
            .get(&day)
            .map(String::as_str)
            .filter(|token| !token.is_empty())
    }

    /// Assigns `type_id` to one person-day, overwriting any previous token.
    pub fn set_day_type(
        &mut self,
        year: Year,
        member_id: MemberId,
        month: MonthIndex,
        day: Day,
        type_id: impl Into<DayTypeId>,
    ) -> RepoResult<()> {
        let members = year_level(&mut self.tree, year);
        let months = member_level(members, member_id);
        month_level(months, month).insert(day, type_id.into());
        self.persist()?;
        debug!(
            "event=day_set module=days status=ok year={year} member_id={member_id} month={month} day={day}"
        );
        Ok(())
    }

    /// Removes one assignment. Missing paths are a no-op and return `false`.
    pub fn clear_day_type(
        &mut self,
        year: Year,
        member_id: MemberId,
        month: MonthIndex,
        day: Day,
    ) -> RepoResult<bool> {
        let Some(members) = self.tree.get_mut(&year) else {
            return Ok(false);
        };
        let Some(months) = members.get_mut(&member_id) else {
            return Ok(false);
        };
        let Some(days) = months.get_mut(&month) else {
            return Ok(false);
        };
        if days.remove(&day).is_none() {
            return Ok(false);
        }

        if days.is_empty() {
            months.remove(&month);
        }
        if months.is_empty() {
            members.remove(&member_id);
        }
        if members.is_empty() {
            self.tree.remove(&year);
        }

        self.persist()?;
        debug!(
            "event=day_clear module=days status=ok year={year} member_id={member_id} month={month} day={day}"
        );
        Ok(true)
    }

    /// Snapshot of one member's assignments for one month; empty when absent.
    pub fn month_assignments(
        &self,
        year: Year,
        member_id: MemberId,
        month: MonthIndex,
    ) -> MonthAssignments {
        self.tree
            .get(&year)
            .and_then(|members| members.get(&member_id))
            .and_then(|months| months.get(&month))
            .cloned()
            .unwrap_or_default()
    }

    /// Counts assigned days per token for one member over a whole year.
    pub fn member_year_counts(
        &self,
        year: Year,
        member_id: MemberId,
    ) -> BTreeMap<DayTypeId, usize> {
        let mut counts = BTreeMap::new();
        let Some(months) = self
            .tree
            .get(&year)
            .and_then(|members| members.get(&member_id))
        else {
            return counts;
        };
        for token in months.values().flat_map(BTreeMap::values) {
            if !token.is_empty() {
                *counts.entry(token.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Returns `true` when at least one assignment exists under `year`.
    pub fn has_year(&self, year: Year) -> bool {
        self.tree.contains_key(&year)
    }

    /// Drops the whole `year` subtree (cascade target of year removal).
    pub fn clear_year(&mut self, year: Year) -> RepoResult<bool> {
        let removed = self.tree.remove(&year).is_some();
        self.persist()?;
        info!("event=days_clear_year module=days status=ok year={year} removed={removed}");
        Ok(removed)
    }

    fn persist(&self) -> RepoResult<()> {
        save_json(&self.repo, DAYS_KEY, &self.tree)
    }
}

fn year_level(tree: &mut AssignmentTree, year: Year) -> &mut YearMembers {
    tree.entry(year).or_default()
}

fn member_level(members: &mut YearMembers, member_id: MemberId) -> &mut MemberMonths {
    members.entry(member_id).or_default()
}

fn month_level(months: &mut MemberMonths, month: MonthIndex) -> &mut MonthAssignments {
    months.entry(month).or_default()
}
