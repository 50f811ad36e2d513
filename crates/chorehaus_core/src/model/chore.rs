//! Chore domain model.
//!
//! # Responsibility
//! - Define the canonical chore record shared by assignment and renewal.
//! - Validate lifecycle invariants before any persistence happens.
//!
//! # Invariants
//! - `status == Assigned` requires `assignee_id`.
//! - `status == Completed` requires `assignee_id` and `completion_date`.
//! - `frequency == 0` marks a one-off chore that is never renewed.
//! - `id` follows the lineage shape accepted by `chore_id::is_valid_chore_id`.
//! - Every date falls in `STORABLE_YEARS`, so its `YYYY-MM-DD` text form
//!   orders the same way the date does.

use crate::model::chore_id::{is_valid_chore_id, new_chore_id};
use crate::model::user::UserId;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

/// Years whose dates are written as plain four-digit `YYYY-MM-DD`.
pub const STORABLE_YEARS: RangeInclusive<i32> = 0..=9999;

/// Returns whether `date` can be persisted and compared as text.
pub fn is_storable_date(date: NaiveDate) -> bool {
    STORABLE_YEARS.contains(&date.year())
}

/// Stable chore identifier, e.g. `7cb263c2-...` or `7cb263c2-...(3)`.
pub type ChoreId = String;

/// Lifecycle state of one chore record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoreStatus {
    /// Waiting for the assignment engine.
    Unassigned,
    /// Owned by one household member.
    Assigned,
    /// Done; may still be renewed if repeating.
    Completed,
    /// Terminal. The lineage continues through the successor record.
    Renewed,
}

impl ChoreStatus {
    /// Storage/wire string for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unassigned => "unassigned",
            Self::Assigned => "assigned",
            Self::Completed => "completed",
            Self::Renewed => "renewed",
        }
    }

    /// Parses the storage/wire string form.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unassigned" => Some(Self::Unassigned),
            "assigned" => Some(Self::Assigned),
            "completed" => Some(Self::Completed),
            "renewed" => Some(Self::Renewed),
            _ => None,
        }
    }
}

impl Display for ChoreStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for chore records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoreValidationError {
    MalformedId(String),
    BlankName,
    ZeroDuration,
    AssignedWithoutAssignee(ChoreId),
    CompletedWithoutAssignee(ChoreId),
    CompletedWithoutCompletionDate(ChoreId),
    DateOutOfRange(ChoreId),
}

impl Display for ChoreValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedId(id) => write!(f, "malformed chore id `{id}`"),
            Self::BlankName => write!(f, "chore name must not be blank"),
            Self::ZeroDuration => write!(f, "expected_duration must be positive"),
            Self::AssignedWithoutAssignee(id) => {
                write!(f, "assigned chore {id} has no assignee_id")
            }
            Self::CompletedWithoutAssignee(id) => {
                write!(f, "completed chore {id} has no assignee_id")
            }
            Self::CompletedWithoutCompletionDate(id) => {
                write!(f, "completed chore {id} has no completion_date")
            }
            Self::DateOutOfRange(id) => write!(
                f,
                "chore {id} has a date outside years {}..={}",
                STORABLE_YEARS.start(),
                STORABLE_YEARS.end()
            ),
        }
    }
}

impl Error for ChoreValidationError {}

/// Canonical household chore record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChoreFields")]
pub struct Chore {
    /// Lineage-aware identifier, unique across the store.
    pub id: ChoreId,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Minutes of work expected; always positive.
    pub expected_duration: u32,
    pub status: ChoreStatus,
    pub assignee_id: Option<UserId>,
    /// Chores without a deadline never count towards workload.
    pub deadline_date: Option<NaiveDate>,
    /// Repeat interval in days. `0` means one-off.
    pub frequency: u32,
    pub completion_date: Option<NaiveDate>,
}

/// Unvalidated mirror of `Chore` used by the serde `try_from` path.
#[derive(Deserialize)]
struct ChoreFields {
    id: ChoreId,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
    expected_duration: u32,
    status: ChoreStatus,
    #[serde(default)]
    assignee_id: Option<UserId>,
    #[serde(default)]
    deadline_date: Option<NaiveDate>,
    #[serde(default)]
    frequency: u32,
    #[serde(default)]
    completion_date: Option<NaiveDate>,
}

impl TryFrom<ChoreFields> for Chore {
    type Error = ChoreValidationError;

    fn try_from(fields: ChoreFields) -> Result<Self, Self::Error> {
        let chore = Self {
            id: fields.id,
            name: fields.name,
            description: fields.description,
            category: fields.category,
            expected_duration: fields.expected_duration,
            status: fields.status,
            assignee_id: fields.assignee_id,
            deadline_date: fields.deadline_date,
            frequency: fields.frequency,
            completion_date: fields.completion_date,
        };
        chore.validate()?;
        Ok(chore)
    }
}

impl Chore {
    /// Creates a fresh unassigned chore with a generated id.
    ///
    /// Optional fields start empty; `frequency` starts at `0` (one-off).
    pub fn new(name: impl Into<String>, expected_duration: u32) -> Self {
        Self {
            id: new_chore_id(),
            name: name.into(),
            description: String::new(),
            category: String::new(),
            expected_duration,
            status: ChoreStatus::Unassigned,
            assignee_id: None,
            deadline_date: None,
            frequency: 0,
            completion_date: None,
        }
    }

    /// Checks lifecycle and shape invariants.
    pub fn validate(&self) -> Result<(), ChoreValidationError> {
        if !is_valid_chore_id(&self.id) {
            return Err(ChoreValidationError::MalformedId(self.id.clone()));
        }
        if self.name.trim().is_empty() {
            return Err(ChoreValidationError::BlankName);
        }
        if self.expected_duration == 0 {
            return Err(ChoreValidationError::ZeroDuration);
        }
        let dates = [self.deadline_date, self.completion_date];
        if dates.into_iter().flatten().any(|date| !is_storable_date(date)) {
            return Err(ChoreValidationError::DateOutOfRange(self.id.clone()));
        }

        match self.status {
            ChoreStatus::Assigned if self.assignee_id.is_none() => Err(
                ChoreValidationError::AssignedWithoutAssignee(self.id.clone()),
            ),
            ChoreStatus::Completed if self.assignee_id.is_none() => Err(
                ChoreValidationError::CompletedWithoutAssignee(self.id.clone()),
            ),
            ChoreStatus::Completed if self.completion_date.is_none() => Err(
                ChoreValidationError::CompletedWithoutCompletionDate(self.id.clone()),
            ),
            _ => Ok(()),
        }
    }

    /// Whether this chore spawns successors after completion.
    pub fn is_repeating(&self) -> bool {
        self.frequency > 0
    }

    /// Hands the chore to `assignee_id`.
    pub fn assign_to(&mut self, assignee_id: impl Into<UserId>) {
        self.status = ChoreStatus::Assigned;
        self.assignee_id = Some(assignee_id.into());
    }
}
