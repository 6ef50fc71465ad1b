//! Process-wide tracker context.
//!
//! # Responsibility
//! - Load the three stores once at startup and hand them out by reference.
//! - Route the year-removal cascade between `YearRegistry` and
//!   `DayAssignmentStore`.
//!
//! # Invariants
//! - One `LeaveTracker` per database; callers share it instead of reloading.
//! - The team migration has run before `load` returns.

use crate::model::year::Year;
use crate::repo::kv_repo::{KvRepository, RepoResult};
use crate::service::day_assignments::DayAssignmentStore;
use crate::service::team_registry::TeamRegistry;
use crate::service::year_registry::YearRegistry;
use log::info;
use std::time::Instant;

/// Explicit context owning the year, team and day-assignment stores.
pub struct LeaveTracker<R: KvRepository + Clone> {
    years: YearRegistry<R>,
    team: TeamRegistry<R>,
    days: DayAssignmentStore<R>,
}

impl<R: KvRepository + Clone> LeaveTracker<R> {
    /// Loads every store from `repo`.
    ///
    /// # Errors
    /// - Propagates storage failures and non-parseable stored values.
    pub fn load(repo: R) -> RepoResult<Self> {
        let started_at = Instant::now();
        let tracker = Self {
            years: YearRegistry::load(repo.clone())?,
            team: TeamRegistry::load(repo.clone())?,
            days: DayAssignmentStore::load(repo)?,
        };
        info!(
            "event=tracker_load module=tracker status=ok years={} members={} duration_ms={}",
            tracker.years.years().len(),
            tracker.team.members().len(),
            started_at.elapsed().as_millis()
        );
        Ok(tracker)
    }

    pub fn years(&self) -> &YearRegistry<R> {
        &self.years
    }

    pub fn years_mut(&mut self) -> &mut YearRegistry<R> {
        &mut self.years
    }

    pub fn team(&self) -> &TeamRegistry<R> {
        &self.team
    }

    pub fn team_mut(&mut self) -> &mut TeamRegistry<R> {
        &mut self.team
    }

    pub fn days(&self) -> &DayAssignmentStore<R> {
        &self.days
    }

    pub fn days_mut(&mut self) -> &mut DayAssignmentStore<R> {
        &mut self.days
    }

    /// Removes `year` from the registry and cascades into day assignments.
    pub fn remove_year(&mut self, year: Year) -> RepoResult<bool> {
        self.years.remove_year(year, &mut self.days)
    }
}
