//! Team member model and its persisted shape.
//!
//! # Responsibility
//! - Define the in-memory member record used by `TeamRegistry`.
//! - Describe the stored `{id, nom, actif}` shape, including records written
//!   before the `actif` flag existed.
//!
//! # Invariants
//! - `id` is unique inside one registry.
//! - `active == false` is the only representation of a removed member.

use serde::{Deserialize, Serialize};

/// Stable integer member identifier (`max(ids) + 1` on creation).
pub type MemberId = i64;

/// Display name of the placeholder member seeded into an empty store.
pub const PLACEHOLDER_MEMBER_NAME: &str = "Prénom Nom";

/// Team member record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    /// Trimmed display name; also the natural key used for reactivation.
    #[serde(rename = "nom")]
    pub name: String,
    /// Soft-delete flag. `false` hides the member from the active roster.
    #[serde(rename = "actif")]
    pub active: bool,
}

impl Member {
    /// Creates an active member, trimming surrounding whitespace from `name`.
    pub fn new(id: MemberId, name: &str) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            active: true,
        }
    }

    /// Marks this member as removed while keeping its record and id.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Restores a removed member.
    pub fn reactivate(&mut self) {
        self.active = true;
    }
}

/// Persisted member record as read back from storage.
///
/// Records saved by older releases have no `actif` field; those deserialize
/// with `active = None` and are upgraded by [`StoredMember::into_member`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredMember {
    pub id: MemberId,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "actif", default)]
    pub active: Option<bool>,
}

impl StoredMember {
    /// Returns `true` when the record predates the `actif` flag.
    pub fn needs_migration(&self) -> bool {
        self.active.is_none()
    }

    /// Converts to the in-memory shape, treating a missing flag as active.
    pub fn into_member(self) -> Member {
        Member {
            id: self.id,
            name: self.name,
            active: self.active.unwrap_or(true),
        }
    }
}

/// Returns the next free id: `max(ids) + 1`, or `1` for an empty slice.
pub fn next_member_id(members: &[Member]) -> MemberId {
    members
        .iter()
        .map(|member| member.id)
        .max()
        .map_or(1, |max_id| max_id + 1)
}
