//! Household member repository contract and SQLite implementation.
//!
//! # Invariants
//! - User names are unique; a clash surfaces as `DuplicateUserName`.
//! - Listings are ordered by `id ASC`, which the assignment tie-break
//!   relies on.

use crate::model::user::{User, UserId};
use crate::repo::household_repo::{
    is_constraint, RepoError, RepoResult, SqliteHouseholdRepository,
};
use rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE;
use rusqlite::params;

/// Record-store contract for household members.
pub trait UserRepository {
    /// Inserts a new user.
    fn create_user(&self, user: &User) -> RepoResult<()>;
    /// Lists all users ordered by id.
    fn list_users(&self) -> RepoResult<Vec<User>>;
    /// Lists all known user ids ordered ascending.
    fn list_user_ids(&self) -> RepoResult<Vec<UserId>>;
    /// Finds a user by exact display name.
    fn get_user_by_name(&self, name: &str) -> RepoResult<Option<User>>;
}

impl<T: UserRepository + ?Sized> UserRepository for &T {
    fn create_user(&self, user: &User) -> RepoResult<()> {
        (**self).create_user(user)
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        (**self).list_users()
    }

    fn list_user_ids(&self) -> RepoResult<Vec<UserId>> {
        (**self).list_user_ids()
    }

    fn get_user_by_name(&self, name: &str) -> RepoResult<Option<User>> {
        (**self).get_user_by_name(name)
    }
}

impl UserRepository for SqliteHouseholdRepository<'_> {
    fn create_user(&self, user: &User) -> RepoResult<()> {
        let result = self.conn.execute(
            "INSERT INTO users (id, name) VALUES (?1, ?2);",
            params![user.id.as_str(), user.name.as_str()],
        );

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_constraint(&err, SQLITE_CONSTRAINT_UNIQUE) => {
                Err(RepoError::DuplicateUserName(user.name.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM users ORDER BY id ASC;")?;
        let users = stmt
            .query_map([], |row| {
                Ok(User::with_id(
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    fn list_user_ids(&self) -> RepoResult<Vec<UserId>> {
        let mut stmt = self.conn.prepare("SELECT id FROM users ORDER BY id ASC;")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    fn get_user_by_name(&self, name: &str) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM users WHERE name = ?1;")?;
        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(User::with_id(
                row.get::<_, String>("id")?,
                row.get::<_, String>("name")?,
            )));
        }
        Ok(None)
    }
}
