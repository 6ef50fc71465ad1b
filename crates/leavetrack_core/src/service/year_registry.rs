//! Tracked-year registry.
//!
//! # Responsibility
//! - Keep the ascending, duplicate-free list of tracked years.
//! - Route year removal into a cascade delete of day assignments.
//!
//! # Invariants
//! - `years` is sorted ascending and unique after every operation.
//! - Every mutation persists the full list under `annees`.

use crate::model::year::{normalize_years, Year, DEFAULT_YEARS};
use crate::repo::kv_repo::{load_json, save_json, KvRepository, RepoResult, YEARS_KEY};
use crate::service::day_assignments::DayAssignmentStore;
use log::info;

/// Registry of tracked years, mirrored to the key-value medium.
pub struct YearRegistry<R: KvRepository> {
    repo: R,
    years: Vec<Year>,
}

impl<R: KvRepository> YearRegistry<R> {
    /// Loads the registry, falling back to [`DEFAULT_YEARS`] when nothing is stored.
    pub fn load(repo: R) -> RepoResult<Self> {
        let mut years = load_json::<Vec<Year>, _>(&repo, YEARS_KEY)?
            .unwrap_or_else(|| DEFAULT_YEARS.to_vec());
        normalize_years(&mut years);
        Ok(Self { repo, years })
    }

    /// Tracked years, ascending.
    pub fn years(&self) -> &[Year] {
        &self.years
    }

    pub fn contains(&self, year: Year) -> bool {
        self.years.binary_search(&year).is_ok()
    }

    /// Adds `year`; returns `false` without writing when it is already tracked.
    pub fn add_year(&mut self, year: Year) -> RepoResult<bool> {
        let Err(index) = self.years.binary_search(&year) else {
            return Ok(false);
        };
        self.years.insert(index, year);
        self.persist()?;
        info!("event=year_add module=years status=ok year={year}");
        Ok(true)
    }

    /// Removes `year` and deletes every day assignment recorded under it.
    ///
    /// The cascade runs even when `year` was not tracked, so orphaned
    /// assignments for that year are purged too.
    pub fn remove_year<D: KvRepository>(
        &mut self,
        year: Year,
        days: &mut DayAssignmentStore<D>,
    ) -> RepoResult<bool> {
        let removed = match self.years.binary_search(&year) {
            Ok(index) => {
                self.years.remove(index);
                self.persist()?;
                true
            }
            Err(_) => false,
        };
        days.clear_year(year)?;
        info!("event=year_remove module=years status=ok year={year} removed={removed}");
        Ok(removed)
    }

    fn persist(&self) -> RepoResult<()> {
        save_json(&self.repo, YEARS_KEY, &self.years)
    }
}

#[cfg(test)]
mod tests {
    use super::YearRegistry;
    use crate::db::open_db_in_memory;
    use crate::repo::kv_repo::{load_json, KvRepository, SqliteKvRepository, YEARS_KEY};

    #[test]
    fn empty_store_starts_with_default_years_without_writing() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteKvRepository::try_new(&conn).unwrap();

        let registry = YearRegistry::load(repo).unwrap();

        assert_eq!(registry.years(), &[2025, 2026]);
        assert!(repo.get_value(YEARS_KEY).unwrap().is_none());
    }

    #[test]
    fn add_year_inserts_in_order_and_persists() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteKvRepository::try_new(&conn).unwrap();
        let mut registry = YearRegistry::load(repo).unwrap();

        assert!(registry.add_year(2024).unwrap());
        assert!(!registry.add_year(2025).unwrap());

        assert_eq!(registry.years(), &[2024, 2025, 2026]);
        let stored: Vec<i32> = load_json(&repo, YEARS_KEY).unwrap().unwrap();
        assert_eq!(stored, vec![2024, 2025, 2026]);
    }
}
