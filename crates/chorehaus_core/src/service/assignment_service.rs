//! Load-balancing chore assignment.
//!
//! # Responsibility
//! - Derive each member's workload over a rolling deadline window.
//! - Hand every unassigned chore to the least-loaded member, heaviest
//!   chore first (longest-processing-time-first greedy).
//!
//! # Invariants
//! - Ties on workload go to the lowest user id.
//! - Each assignment is written through before the next one is chosen.
//! - A failed write aborts the pass; earlier writes stay committed.

use crate::config::EngineConfig;
use crate::model::chore::{ChoreId, ChoreStatus};
use crate::model::user::UserId;
use crate::repo::chore_repo::{ChoreQuery, ChoreRepository};
use crate::repo::user_repo::UserRepository;
use crate::service::error::ServiceResult;
use chrono::{Days, NaiveDate};
use log::{debug, info, warn};
use serde::Serialize;

/// Running workload of one member, in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserWorkload {
    pub user_id: UserId,
    pub minutes: u64,
}

/// One chore handed to one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub chore_id: ChoreId,
    pub assignee_id: UserId,
    pub expected_duration: u32,
}

/// Outcome of one assignment pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssignmentReport {
    /// Assignments in the order they were persisted.
    pub assignments: Vec<Assignment>,
    /// Workloads after the pass, ordered by user id. Empty when the pass
    /// was a no-op.
    pub workloads: Vec<UserWorkload>,
}

impl AssignmentReport {
    /// Whether the pass changed nothing.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Assignment engine over any chore + user store.
pub struct AssignmentService<R> {
    repo: R,
    config: EngineConfig,
}

impl<R: ChoreRepository + UserRepository> AssignmentService<R> {
    /// Creates a service with default engine configuration.
    pub fn new(repo: R) -> Self {
        Self::with_config(repo, EngineConfig::default())
    }

    pub fn with_config(repo: R, config: EngineConfig) -> Self {
        Self { repo, config }
    }

    /// Distributes every `Unassigned` chore across known users.
    ///
    /// # Contract
    /// - No unassigned chores: returns an empty report, touches nothing.
    /// - No users: returns an empty report, touches nothing.
    /// - Otherwise each chore ends `Assigned` with `assignee_id` set.
    pub fn assign_unassigned_chores(&self, today: NaiveDate) -> ServiceResult<AssignmentReport> {
        let mut pending = self
            .repo
            .list_chores(&ChoreQuery::with_status(ChoreStatus::Unassigned))?;
        if pending.is_empty() {
            info!("event=chore_assign module=service status=skipped reason=no_unassigned_chores");
            return Ok(AssignmentReport::default());
        }

        let mut workloads = Vec::new();
        for user_id in self.repo.list_user_ids()? {
            let minutes = self.user_workload(&user_id, today)?;
            workloads.push(UserWorkload { user_id, minutes });
        }
        if workloads.is_empty() {
            warn!(
                "event=chore_assign module=service status=skipped reason=no_users pending={}",
                pending.len()
            );
            return Ok(AssignmentReport::default());
        }

        // Stable: equal durations keep repository (id) order.
        pending.sort_by(|a, b| b.expected_duration.cmp(&a.expected_duration));

        let mut assignments = Vec::with_capacity(pending.len());
        for mut chore in pending {
            let Some(index) = least_loaded(&workloads) else {
                break;
            };
            let target = &mut workloads[index];

            chore.assign_to(target.user_id.clone());
            self.repo.update_chore(&chore)?;
            target.minutes += u64::from(chore.expected_duration);

            debug!(
                "event=chore_assign module=service status=progress chore_id={} assignee_id={} duration={} assignee_workload={}",
                chore.id, target.user_id, chore.expected_duration, target.minutes
            );
            assignments.push(Assignment {
                chore_id: chore.id,
                assignee_id: target.user_id.clone(),
                expected_duration: chore.expected_duration,
            });
        }

        info!(
            "event=chore_assign module=service status=ok assigned={} users={}",
            assignments.len(),
            workloads.len()
        );
        Ok(AssignmentReport {
            assignments,
            workloads,
        })
    }

    /// Sums `expected_duration` of the user's chores, any status, whose
    /// deadline lies within the configured window around `today`.
    pub fn user_workload(&self, user_id: &str, today: NaiveDate) -> ServiceResult<u64> {
        let window = Days::new(u64::from(self.config.workload_window_days));
        let query = ChoreQuery {
            assignee_id: Some(user_id.to_string()),
            min_deadline: Some(today.checked_sub_days(window).unwrap_or(NaiveDate::MIN)),
            max_deadline: Some(today.checked_add_days(window).unwrap_or(NaiveDate::MAX)),
            ..ChoreQuery::default()
        };

        let chores = self.repo.list_chores(&query)?;
        Ok(chores
            .iter()
            .map(|chore| u64::from(chore.expected_duration))
            .sum())
    }
}

/// Index of the member with the smallest workload; lowest id wins ties.
fn least_loaded(workloads: &[UserWorkload]) -> Option<usize> {
    workloads
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.minutes
                .cmp(&b.minutes)
                .then_with(|| a.user_id.cmp(&b.user_id))
        })
        .map(|(index, _)| index)
}
