//! Team member registry with soft delete and reactivation.
//!
//! # Responsibility
//! - Own the ordered member list and its persisted copy under `equipe`.
//! - Upgrade records stored before the `actif` flag existed.
//!
//! # Invariants
//! - Ids come from `max(ids) + 1` and are never handed out twice, because
//!   `add_member` and `remove_member` never drop a record.
//! - Removing a member never touches its day assignments.
//! - Every structural mutation persists the full member list.

use crate::model::member::{
    next_member_id, Member, MemberId, StoredMember, PLACEHOLDER_MEMBER_NAME,
};
use crate::repo::kv_repo::{load_json, save_json, KvRepository, RepoResult, TEAM_KEY};
use log::info;

/// Outcome of [`TeamRegistry::add_member`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddMemberOutcome {
    /// A new record was created with this id.
    Created(MemberId),
    /// A removed record with the same trimmed name was reactivated.
    Reactivated(MemberId),
    /// An active record with the same trimmed name already exists.
    AlreadyActive(MemberId),
}

impl AddMemberOutcome {
    pub fn id(self) -> MemberId {
        match self {
            Self::Created(id) | Self::Reactivated(id) | Self::AlreadyActive(id) => id,
        }
    }

    /// Returns `false` when the registry was left untouched.
    pub fn changed(self) -> bool {
        !matches!(self, Self::AlreadyActive(_))
    }
}

/// Registry of team members, mirrored to the key-value medium.
pub struct TeamRegistry<R: KvRepository> {
    repo: R,
    members: Vec<Member>,
}

impl<R: KvRepository> TeamRegistry<R> {
    /// Loads members, migrating legacy records before the first read.
    ///
    /// # Side effects
    /// - When any stored record lacks `actif`, the upgraded list is written
    ///   back immediately.
    pub fn load(repo: R) -> RepoResult<Self> {
        let Some(stored) = load_json::<Vec<StoredMember>, _>(&repo, TEAM_KEY)? else {
            return Ok(Self {
                repo,
                members: vec![Member::new(1, PLACEHOLDER_MEMBER_NAME)],
            });
        };

        let migrated = stored.iter().filter(|m| m.needs_migration()).count();
        let members = stored.into_iter().map(StoredMember::into_member).collect();
        let registry = Self { repo, members };

        if migrated > 0 {
            registry.persist()?;
            info!("event=team_migrate module=team status=ok upgraded={migrated}");
        }
        Ok(registry)
    }

    /// Every record, including removed members, in insertion order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Members that have not been removed, in insertion order.
    pub fn active_members(&self) -> Vec<&Member> {
        self.members.iter().filter(|member| member.active).collect()
    }

    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    /// Adds a member by name, reactivating a previous record with the same
    /// trimmed name instead of creating a second identity.
    ///
    /// Stored names are trimmed before comparison too, since imported and
    /// legacy records may keep surrounding whitespace.
    pub fn add_member(&mut self, name: &str) -> RepoResult<AddMemberOutcome> {
        let name = name.trim();
        let outcome = match self
            .members
            .iter_mut()
            .find(|member| member.name.trim() == name)
        {
            Some(existing) if existing.active => AddMemberOutcome::AlreadyActive(existing.id),
            Some(existing) => {
                existing.reactivate();
                AddMemberOutcome::Reactivated(existing.id)
            }
            None => {
                let id = next_member_id(&self.members);
                self.members.push(Member::new(id, name));
                AddMemberOutcome::Created(id)
            }
        };
        if !outcome.changed() {
            return Ok(outcome);
        }

        self.persist()?;
        info!(
            "event=member_add module=team status=ok member_id={} reactivated={}",
            outcome.id(),
            matches!(outcome, AddMemberOutcome::Reactivated(_))
        );
        Ok(outcome)
    }

    /// Soft-deletes the member. Unknown or already removed ids return `false`
    /// without writing.
    pub fn remove_member(&mut self, id: MemberId) -> RepoResult<bool> {
        let Some(member) = self.members.iter_mut().find(|member| member.id == id) else {
            return Ok(false);
        };
        if !member.active {
            return Ok(false);
        }
        member.deactivate();
        self.persist()?;
        info!("event=member_remove module=team status=ok member_id={id}");
        Ok(true)
    }

    /// Renames a member; the new name is trimmed. Returns `false` for unknown ids.
    pub fn rename_member(&mut self, id: MemberId, name: &str) -> RepoResult<bool> {
        let Some(member) = self.members.iter_mut().find(|member| member.id == id) else {
            return Ok(false);
        };
        member.name = name.trim().to_string();
        self.persist()?;
        info!("event=member_rename module=team status=ok member_id={id}");
        Ok(true)
    }

    /// Replaces the whole member list verbatim (bulk import path).
    ///
    /// No trimming, deduplication or id checks are applied to `members`.
    pub fn replace_all(&mut self, members: Vec<Member>) -> RepoResult<()> {
        self.members = members;
        self.persist()?;
        info!(
            "event=team_replace module=team status=ok count={}",
            self.members.len()
        );
        Ok(())
    }

    fn persist(&self) -> RepoResult<()> {
        save_json(&self.repo, TEAM_KEY, &self.members)
    }
}
