//! Key-value repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide whole-value get/put/delete over the `kv_entries` table.
//! - Encode and decode store snapshots as JSON.
//!
//! # Invariants
//! - Keys are non-empty.
//! - `put_value` replaces the previous value for the key atomically.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key for the tracked year list.
pub const YEARS_KEY: &str = "annees";
/// Storage key for the team member list.
pub const TEAM_KEY: &str = "equipe";
/// Storage key for the nested day assignments.
pub const DAYS_KEY: &str = "jours";

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from the persistence medium.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Stored value could not be encoded or decoded.
    Serialization {
        key: String,
        source: serde_json::Error,
    },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Caller passed a value the medium cannot store.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization { key, source } => {
                write!(f, "invalid stored value for key `{key}`: {source}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "key-value repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid key-value data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization { source, .. } => Some(source),
            Self::UninitializedConnection { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable key-value medium used by every store.
pub trait KvRepository {
    /// Returns the raw stored value, or `None` when the key was never written.
    fn get_value(&self, key: &str) -> RepoResult<Option<String>>;
    /// Writes `value` under `key`, replacing any previous value.
    fn put_value(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Removes `key`. Removing an absent key is not an error.
    fn delete_value(&self, key: &str) -> RepoResult<()>;
    /// Lists stored keys in ascending order.
    fn list_keys(&self) -> RepoResult<Vec<String>>;
}

/// SQLite-backed key-value repository.
#[derive(Clone, Copy)]
pub struct SqliteKvRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvRepository<'conn> {
    /// Wraps a connection opened through `db::open_db*`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version = current_user_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl KvRepository for SqliteKvRepository<'_> {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put_value(&self, key: &str, value: &str) -> RepoResult<()> {
        ensure_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete_value(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn list_keys(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_entries ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

/// Reads and decodes the JSON value stored under `key`.
pub fn load_json<T, R>(repo: &R, key: &str) -> RepoResult<Option<T>>
where
    T: DeserializeOwned,
    R: KvRepository + ?Sized,
{
    let Some(raw) = repo.get_value(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| RepoError::Serialization {
            key: key.to_string(),
            source,
        })
}

/// Encodes `value` as JSON and stores it under `key`.
pub fn save_json<T, R>(repo: &R, key: &str, value: &T) -> RepoResult<()>
where
    T: Serialize + ?Sized,
    R: KvRepository + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| RepoError::Serialization {
        key: key.to_string(),
        source,
    })?;
    repo.put_value(key, &raw)
}

fn ensure_key(key: &str) -> RepoResult<()> {
    if key.is_empty() {
        return Err(RepoError::InvalidData("key cannot be empty".to_string()));
    }
    Ok(())
}
