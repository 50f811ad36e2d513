//! Service-level error shared by chore, user and engine use-cases.

use crate::model::chore::{ChoreId, ChoreStatus};
use crate::model::chore_id::ChoreIdError;
use crate::repo::household_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by service operations.
///
/// Every variant is fatal for the running operation; writes committed
/// before the failure stay committed.
#[derive(Debug)]
pub enum ServiceError {
    /// Chore id does not follow the lineage shape.
    MalformedChoreId(String),
    /// A created chore collides with an existing id.
    DuplicateChoreId(ChoreId),
    /// Target chore does not exist.
    ChoreNotFound(ChoreId),
    /// Requested lifecycle move is not allowed from the current status.
    InvalidTransition {
        chore_id: ChoreId,
        from: ChoreStatus,
        to: ChoreStatus,
    },
    /// Completed chore has no completion date to renew from.
    MissingCompletionDate(ChoreId),
    /// Successor deadline falls outside the storable years.
    DeadlineOutOfRange(ChoreId),
    /// User name is blank after trim.
    InvalidUserName,
    /// User name already taken.
    DuplicateUserName(String),
    /// Household name is blank after trim.
    InvalidHouseholdName,
    /// Household must expect at least one occupant.
    InvalidOccupantCount,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedChoreId(id) => write!(f, "malformed chore id `{id}`"),
            Self::DuplicateChoreId(id) => write!(f, "chore id already exists: {id}"),
            Self::ChoreNotFound(id) => write!(f, "chore not found: {id}"),
            Self::InvalidTransition { chore_id, from, to } => {
                write!(f, "chore {chore_id} cannot move from {from} to {to}")
            }
            Self::MissingCompletionDate(id) => {
                write!(f, "chore {id} has no completion date")
            }
            Self::DeadlineOutOfRange(id) => {
                write!(f, "successor deadline for chore {id} is out of range")
            }
            Self::InvalidUserName => write!(f, "user name must not be blank"),
            Self::DuplicateUserName(name) => write!(f, "user name already exists: `{name}`"),
            Self::InvalidHouseholdName => write!(f, "household name must not be blank"),
            Self::InvalidOccupantCount => {
                write!(f, "household must expect at least one occupant")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ChoreNotFound(id) => Self::ChoreNotFound(id),
            RepoError::DuplicateChoreId(id) => Self::DuplicateChoreId(id),
            RepoError::DuplicateUserName(name) => Self::DuplicateUserName(name),
            other => Self::Repo(other),
        }
    }
}

impl From<ChoreIdError> for ServiceError {
    fn from(value: ChoreIdError) -> Self {
        match value {
            ChoreIdError::Malformed(id) => Self::MalformedChoreId(id),
        }
    }
}
