//! Chore repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the filterable read and write-through mutation APIs the
//!   engines run on.
//! - Keep the string encodings of status and dates inside this boundary.
//!
//! # Invariants
//! - Write paths call `Chore::validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - `list_chores` results are ordered by `id ASC`.
//! - Deadline bounds outside `STORABLE_YEARS` are resolved here, before
//!   any text comparison reaches SQL.
//! - `create_chores` writes all chores or none.

use crate::model::chore::{is_storable_date, Chore, ChoreStatus, STORABLE_YEARS};
use crate::model::user::UserId;
use crate::repo::household_repo::{
    is_constraint, RepoError, RepoResult, SqliteHouseholdRepository,
};
use chrono::{Datelike, NaiveDate};
use rusqlite::ffi::{SQLITE_CONSTRAINT_PRIMARYKEY, SQLITE_CONSTRAINT_UNIQUE};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};

const DATE_FORMAT: &str = "%Y-%m-%d";

const CHORE_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    category,
    expected_duration,
    status,
    assignee_id,
    deadline_date,
    frequency,
    completion_date
FROM chores";

/// Filter options for listing chores. Unset fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoreQuery {
    /// Exact assignee match.
    pub assignee_id: Option<UserId>,
    /// Exact status match.
    pub status: Option<ChoreStatus>,
    /// Inclusive lower deadline bound. Chores without deadline never match.
    pub min_deadline: Option<NaiveDate>,
    /// Inclusive upper deadline bound. Chores without deadline never match.
    pub max_deadline: Option<NaiveDate>,
    /// Only chores with `frequency > 0`.
    pub repeating_only: bool,
}

impl ChoreQuery {
    /// Matches every chore in `status`.
    pub fn with_status(status: ChoreStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Returns whether `chore` satisfies every set filter.
    ///
    /// Mirrors the SQL semantics for in-memory stores.
    pub fn matches(&self, chore: &Chore) -> bool {
        if let Some(assignee_id) = &self.assignee_id {
            if chore.assignee_id.as_ref() != Some(assignee_id) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if chore.status != status {
                return false;
            }
        }
        if self.min_deadline.is_some() || self.max_deadline.is_some() {
            let Some(deadline) = chore.deadline_date else {
                return false;
            };
            if self.min_deadline.is_some_and(|min| deadline < min) {
                return false;
            }
            if self.max_deadline.is_some_and(|max| deadline > max) {
                return false;
            }
        }
        !self.repeating_only || chore.is_repeating()
    }
}

/// Record-store contract for chores.
pub trait ChoreRepository {
    /// Inserts a new chore. Fails with `DuplicateChoreId` when the id exists.
    fn create_chore(&self, chore: &Chore) -> RepoResult<()>;
    /// Inserts several chores atomically. Nothing is written on failure.
    fn create_chores(&self, chores: &[Chore]) -> RepoResult<()>;
    /// Replaces an existing chore by id. Fails with `ChoreNotFound` when absent.
    fn update_chore(&self, chore: &Chore) -> RepoResult<()>;
    /// Gets one chore by id.
    fn get_chore(&self, id: &str) -> RepoResult<Option<Chore>>;
    /// Lists chores matching `query`, ordered by id.
    fn list_chores(&self, query: &ChoreQuery) -> RepoResult<Vec<Chore>>;
}

impl<T: ChoreRepository + ?Sized> ChoreRepository for &T {
    fn create_chore(&self, chore: &Chore) -> RepoResult<()> {
        (**self).create_chore(chore)
    }

    fn create_chores(&self, chores: &[Chore]) -> RepoResult<()> {
        (**self).create_chores(chores)
    }

    fn update_chore(&self, chore: &Chore) -> RepoResult<()> {
        (**self).update_chore(chore)
    }

    fn get_chore(&self, id: &str) -> RepoResult<Option<Chore>> {
        (**self).get_chore(id)
    }

    fn list_chores(&self, query: &ChoreQuery) -> RepoResult<Vec<Chore>> {
        (**self).list_chores(query)
    }
}

impl ChoreRepository for SqliteHouseholdRepository<'_> {
    fn create_chore(&self, chore: &Chore) -> RepoResult<()> {
        chore.validate()?;
        insert_chore(self.conn, chore)
    }

    fn create_chores(&self, chores: &[Chore]) -> RepoResult<()> {
        for chore in chores {
            chore.validate()?;
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        for chore in chores {
            insert_chore(&tx, chore)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn update_chore(&self, chore: &Chore) -> RepoResult<()> {
        chore.validate()?;

        let changed = self.conn.execute(
            "UPDATE chores
             SET
                name = ?1,
                description = ?2,
                category = ?3,
                expected_duration = ?4,
                status = ?5,
                assignee_id = ?6,
                deadline_date = ?7,
                frequency = ?8,
                completion_date = ?9,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?10;",
            params![
                chore.name.as_str(),
                chore.description.as_str(),
                chore.category.as_str(),
                chore.expected_duration,
                chore.status.as_str(),
                chore.assignee_id.as_deref(),
                chore.deadline_date.map(date_to_db),
                chore.frequency,
                chore.completion_date.map(date_to_db),
                chore.id.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::ChoreNotFound(chore.id.clone()));
        }

        Ok(())
    }

    fn get_chore(&self, id: &str) -> RepoResult<Option<Chore>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHORE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_chore_row(row)?));
        }

        Ok(None)
    }

    fn list_chores(&self, query: &ChoreQuery) -> RepoResult<Vec<Chore>> {
        let mut sql = format!("{CHORE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(assignee_id) = &query.assignee_id {
            sql.push_str(" AND assignee_id = ?");
            bind_values.push(Value::Text(assignee_id.clone()));
        }
        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(status.as_str().to_string()));
        }
        if query.min_deadline.is_some() || query.max_deadline.is_some() {
            sql.push_str(" AND deadline_date IS NOT NULL");
        }
        if let Some(min_deadline) = query.min_deadline {
            if min_deadline.year() > *STORABLE_YEARS.end() {
                return Ok(Vec::new());
            }
            if is_storable_date(min_deadline) {
                sql.push_str(" AND deadline_date >= ?");
                bind_values.push(Value::Text(date_to_db(min_deadline)));
            }
        }
        if let Some(max_deadline) = query.max_deadline {
            if max_deadline.year() < *STORABLE_YEARS.start() {
                return Ok(Vec::new());
            }
            if is_storable_date(max_deadline) {
                sql.push_str(" AND deadline_date <= ?");
                bind_values.push(Value::Text(date_to_db(max_deadline)));
            }
        }
        if query.repeating_only {
            sql.push_str(" AND frequency > 0");
        }

        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut chores = Vec::new();

        while let Some(row) = rows.next()? {
            chores.push(parse_chore_row(row)?);
        }

        Ok(chores)
    }
}

fn insert_chore(conn: &Connection, chore: &Chore) -> RepoResult<()> {
    let result = conn.execute(
        "INSERT INTO chores (
            id,
            name,
            description,
            category,
            expected_duration,
            status,
            assignee_id,
            deadline_date,
            frequency,
            completion_date
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
        params![
            chore.id.as_str(),
            chore.name.as_str(),
            chore.description.as_str(),
            chore.category.as_str(),
            chore.expected_duration,
            chore.status.as_str(),
            chore.assignee_id.as_deref(),
            chore.deadline_date.map(date_to_db),
            chore.frequency,
            chore.completion_date.map(date_to_db),
        ],
    );

    match result {
        Ok(_) => Ok(()),
        Err(err)
            if is_constraint(&err, SQLITE_CONSTRAINT_PRIMARYKEY)
                || is_constraint(&err, SQLITE_CONSTRAINT_UNIQUE) =>
        {
            Err(RepoError::DuplicateChoreId(chore.id.clone()))
        }
        Err(err) => Err(err.into()),
    }
}

fn parse_chore_row(row: &Row<'_>) -> RepoResult<Chore> {
    let id: String = row.get("id")?;

    let status_text: String = row.get("status")?;
    let status = ChoreStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in chores.status"))
    })?;

    let chore = Chore {
        name: row.get("name")?,
        description: row.get("description")?,
        category: row.get("category")?,
        expected_duration: parse_u32(row.get("expected_duration")?, "expected_duration")?,
        status,
        assignee_id: row.get("assignee_id")?,
        deadline_date: parse_optional_date(row.get("deadline_date")?, "deadline_date")?,
        frequency: parse_u32(row.get("frequency")?, "frequency")?,
        completion_date: parse_optional_date(row.get("completion_date")?, "completion_date")?,
        id,
    };
    chore.validate()?;
    Ok(chore)
}

fn parse_u32(value: i64, column: &str) -> RepoResult<u32> {
    u32::try_from(value).map_err(|_| {
        RepoError::InvalidData(format!("out of range value `{value}` in chores.{column}"))
    })
}

fn parse_optional_date(value: Option<String>, column: &str) -> RepoResult<Option<NaiveDate>> {
    value
        .map(|text| {
            NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|_| {
                RepoError::InvalidData(format!("invalid date `{text}` in chores.{column}"))
            })
        })
        .transpose()
}

fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

