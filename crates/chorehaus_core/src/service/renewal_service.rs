//! Renewal of completed repeating chores.
//!
//! # Responsibility
//! - Retire completed repeating chores whose deadline has passed.
//! - Spawn the next chore in each lineage and hand it to assignment.
//!
//! # Invariants
//! - A `Renewed` chore is never selected again, so repeated passes without
//!   new completions create nothing.
//! - The successor id is derived before any write, so a malformed id leaves
//!   the source chore untouched.
//! - A successor id clash is fatal and never overwrites the existing record.

use crate::config::EngineConfig;
use crate::model::chore::{is_storable_date, Chore, ChoreId, ChoreStatus};
use crate::model::chore_id::increment_id;
use crate::repo::chore_repo::{ChoreQuery, ChoreRepository};
use crate::repo::user_repo::UserRepository;
use crate::service::assignment_service::{AssignmentReport, AssignmentService};
use crate::service::error::{ServiceError, ServiceResult};
use chrono::{Days, NaiveDate};
use log::{debug, info};
use serde::Serialize;

/// One retired chore and the successor created for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Renewal {
    pub renewed_id: ChoreId,
    pub successor: Chore,
}

/// Outcome of one renewal pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenewalReport {
    pub renewals: Vec<Renewal>,
    /// Present when assignment ran after renewal.
    pub assignment: Option<AssignmentReport>,
}

/// Renewal engine over any chore + user store.
pub struct RenewalService<R> {
    repo: R,
    config: EngineConfig,
}

impl<R: ChoreRepository + UserRepository> RenewalService<R> {
    /// Creates a service with default engine configuration.
    pub fn new(repo: R) -> Self {
        Self::with_config(repo, EngineConfig::default())
    }

    pub fn with_config(repo: R, config: EngineConfig) -> Self {
        Self { repo, config }
    }

    /// Renews every completed repeating chore with `deadline_date <= today`,
    /// then runs one assignment pass when configured to.
    pub fn renew_repeating_chores(&self, today: NaiveDate) -> ServiceResult<RenewalReport> {
        let query = ChoreQuery {
            status: Some(ChoreStatus::Completed),
            max_deadline: Some(today),
            repeating_only: true,
            ..ChoreQuery::default()
        };
        let due = self.repo.list_chores(&query)?;

        let mut renewals = Vec::with_capacity(due.len());
        for chore in due {
            renewals.push(self.renew_chore(chore)?);
        }
        info!(
            "event=chore_renew module=service status=ok renewed={}",
            renewals.len()
        );

        let assignment = if self.config.assign_after_renewal {
            let assigner = AssignmentService::with_config(&self.repo, self.config);
            Some(assigner.assign_unassigned_chores(today)?)
        } else {
            None
        };

        Ok(RenewalReport {
            renewals,
            assignment,
        })
    }

    fn renew_chore(&self, mut chore: Chore) -> ServiceResult<Renewal> {
        let successor = successor_of(&chore)?;

        chore.status = ChoreStatus::Renewed;
        self.repo.update_chore(&chore)?;
        self.repo.create_chore(&successor)?;

        debug!(
            "event=chore_renew module=service status=progress renewed_id={} successor_id={}",
            chore.id, successor.id
        );
        Ok(Renewal {
            renewed_id: chore.id,
            successor,
        })
    }
}

/// Builds the unassigned successor of a completed repeating chore.
///
/// The successor copies every descriptive attribute and gets:
/// - `id = increment_id(chore.id)`
/// - `deadline_date = completion_date + (frequency + 1)` days
/// - no assignee and no completion date
///
/// # Errors
/// - `InvalidTransition` when the chore is not completed or not repeating.
/// - `MissingCompletionDate`, `MalformedChoreId`.
/// - `DeadlineOutOfRange` when the new deadline leaves `STORABLE_YEARS`.
pub fn successor_of(chore: &Chore) -> ServiceResult<Chore> {
    if chore.status != ChoreStatus::Completed || !chore.is_repeating() {
        return Err(ServiceError::InvalidTransition {
            chore_id: chore.id.clone(),
            from: chore.status,
            to: ChoreStatus::Renewed,
        });
    }

    let id = increment_id(&chore.id)?;
    let completed_on = chore
        .completion_date
        .ok_or_else(|| ServiceError::MissingCompletionDate(chore.id.clone()))?;
    let deadline = completed_on
        .checked_add_days(Days::new(u64::from(chore.frequency) + 1))
        .filter(|deadline| is_storable_date(*deadline))
        .ok_or_else(|| ServiceError::DeadlineOutOfRange(chore.id.clone()))?;

    Ok(Chore {
        id,
        status: ChoreStatus::Unassigned,
        assignee_id: None,
        deadline_date: Some(deadline),
        completion_date: None,
        ..chore.clone()
    })
}
