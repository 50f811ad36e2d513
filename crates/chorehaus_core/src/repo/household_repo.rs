//! Shared SQLite repository handle and repository error type.
//!
//! # Responsibility
//! - Own the borrowed connection used by chore and user repositories.
//! - Refuse connections that have not been migrated by `db::open_db*`.
//!
//! # Invariants
//! - A constructed repository always sees the latest schema version.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::chore::{ChoreId, ChoreValidationError};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

const REQUIRED_TABLES: &[&str] = &["users", "chores", "household"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for chore/user persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ChoreValidationError),
    Db(DbError),
    ChoreNotFound(ChoreId),
    DuplicateChoreId(ChoreId),
    DuplicateUserName(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::ChoreNotFound(id) => write!(f, "chore not found: {id}"),
            Self::DuplicateChoreId(id) => write!(f, "chore id already exists: {id}"),
            Self::DuplicateUserName(name) => write!(f, "user name already exists: `{name}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table missing: {table}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ChoreValidationError> for RepoError {
    fn from(value: ChoreValidationError) -> Self {
        Self::Validation(value)
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

/// SQLite-backed household store implementing both chore and user contracts.
pub struct SqliteHouseholdRepository<'conn> {
    pub(crate) conn: &'conn Connection,
}

impl<'conn> SqliteHouseholdRepository<'conn> {
    /// Wraps a connection returned by `db::open_db` / `db::open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` when the schema was tampered with.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version = current_user_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        for table in REQUIRED_TABLES {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(*table));
            }
        }

        Ok(Self { conn })
    }
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Returns whether `err` is a SQLite constraint failure with `extended_code`.
pub(crate) fn is_constraint(err: &rusqlite::Error, extended_code: i32) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _) if failure.extended_code == extended_code
    )
}
