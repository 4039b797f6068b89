//! Generic store contract shared by every catalog entity.
//!
//! # Responsibility
//! - Define the CRUD + existence capability each persistence adapter offers.
//! - Classify storage failures so services can tell constraint violations
//!   apart from everything else.
//! - Verify a connection is migrated before an adapter uses it.
//!
//! # Invariants
//! - `save` inserts when the record has no id and overwrites otherwise; the
//!   returned record always carries the store-assigned id.
//! - Uniqueness and referential integrity are enforced by SQLite and surface
//!   as [`RepoError::ConstraintViolation`].

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::EntityId;
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for catalog persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// SQLite rejected a write because of a UNIQUE/FOREIGN KEY/NOT NULL rule.
    ConstraintViolation(rusqlite::Error),
    Db(DbError),
    /// An update targeted a row that does not exist.
    NotFound {
        entity: &'static str,
        id: EntityId,
    },
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Returns whether this failure is a storage-level integrity violation.
    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConstraintViolation(err) => write!(f, "constraint violation: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found with id {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ConstraintViolation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => err.into(),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if value.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
            Self::ConstraintViolation(value)
        } else {
            Self::Db(DbError::Sqlite(value))
        }
    }
}

/// Persistence capability for one entity type.
pub trait EntityStore<T> {
    /// Returns every record in store order.
    fn find_all(&self) -> RepoResult<Vec<T>>;
    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<T>>;
    /// Inserts or overwrites `entity` and returns the stored record.
    fn save(&self, entity: &T) -> RepoResult<T>;
    /// Removes the record. Removing a missing id is a no-op.
    fn delete_by_id(&self, id: EntityId) -> RepoResult<()>;
    fn exists_by_id(&self, id: EntityId) -> RepoResult<bool>;
}

/// Checks that `conn` is migrated and exposes `table` with `columns`.
pub(crate) fn ensure_table_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }
    for &column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
