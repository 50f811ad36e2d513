//! Chore use-case service.
//!
//! # Responsibility
//! - Create chores, read them back, and record their completion.
//! - Seed a fresh household with the default chore catalogue.
//!
//! # Invariants
//! - New chores always start `Unassigned` with a fresh lineage id.
//! - Only `Assigned` chores can be completed.

use crate::model::chore::{Chore, ChoreStatus};
use crate::repo::chore_repo::{ChoreQuery, ChoreRepository};
use crate::repo::household_repo::RepoResult;
use crate::service::error::{ServiceError, ServiceResult};
use chrono::NaiveDate;
use log::info;

/// Repeat interval for seeded chores, in days.
const DEFAULT_CHORE_FREQUENCY: u32 = 7;

/// `(name, description, category, expected_duration)`
const DEFAULT_CHORES: &[(&str, &str, &str, u32)] = &[
    ("Dishes", "Wash and dry the dishes", "Kitchen", 30),
    ("Laundry", "Wash, dry, and fold clothes", "Laundry", 60),
    ("Vacuum", "Vacuum all carpets and rugs", "General", 30),
    ("Dusting", "Dust all surfaces", "General", 20),
    ("Trash", "Take out the trash and recycling", "General", 10),
    ("Bathroom", "Clean the toilets and showers", "Bathroom", 45),
    ("Sweeping", "Sweep floors", "General", 20),
    ("Mopping", "Mop floors", "General", 30),
];

/// Request model for creating one chore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChore {
    pub name: String,
    pub description: String,
    pub category: String,
    /// Minutes; must be positive.
    pub expected_duration: u32,
    /// Days between repetitions; `0` for one-off.
    pub frequency: u32,
    pub deadline_date: Option<NaiveDate>,
}

/// Chore service facade over repository implementations.
pub struct ChoreService<R: ChoreRepository> {
    repo: R,
}

impl<R: ChoreRepository> ChoreService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one unassigned chore and returns the stored record.
    pub fn create_chore(&self, request: &NewChore) -> ServiceResult<Chore> {
        let chore = build_chore(request);
        self.repo.create_chore(&chore)?;
        info!(
            "event=chore_create module=service status=ok chore_id={} repeating={}",
            chore.id,
            chore.is_repeating()
        );
        Ok(chore)
    }

    /// Gets one chore by id.
    pub fn get_chore(&self, id: &str) -> RepoResult<Option<Chore>> {
        self.repo.get_chore(id)
    }

    /// Lists chores matching `query`.
    pub fn list_chores(&self, query: &ChoreQuery) -> RepoResult<Vec<Chore>> {
        self.repo.list_chores(query)
    }

    /// Marks an assigned chore as done on `completion_date`.
    ///
    /// Renewal is not triggered here; callers run
    /// `RenewalService::renew_repeating_chores` afterwards.
    pub fn complete_chore(&self, id: &str, completion_date: NaiveDate) -> ServiceResult<Chore> {
        let mut chore = self
            .repo
            .get_chore(id)?
            .ok_or_else(|| ServiceError::ChoreNotFound(id.to_string()))?;

        if chore.status != ChoreStatus::Assigned {
            return Err(ServiceError::InvalidTransition {
                chore_id: chore.id,
                from: chore.status,
                to: ChoreStatus::Completed,
            });
        }

        chore.status = ChoreStatus::Completed;
        chore.completion_date = Some(completion_date);
        self.repo.update_chore(&chore)?;
        info!(
            "event=chore_complete module=service status=ok chore_id={}",
            chore.id
        );
        Ok(chore)
    }

    /// Inserts the default weekly household chores, all due on `deadline`.
    ///
    /// The catalogue is written in one batch; a failure leaves no seeded
    /// chore behind.
    pub fn seed_default_chores(&self, deadline: NaiveDate) -> ServiceResult<Vec<Chore>> {
        let chores = DEFAULT_CHORES
            .iter()
            .map(|&(name, description, category, expected_duration)| {
                build_chore(&NewChore {
                    name: name.to_string(),
                    description: description.to_string(),
                    category: category.to_string(),
                    expected_duration,
                    frequency: DEFAULT_CHORE_FREQUENCY,
                    deadline_date: Some(deadline),
                })
            })
            .collect::<Vec<_>>();

        self.repo.create_chores(&chores)?;
        info!(
            "event=chore_seed module=service status=ok count={} deadline={}",
            chores.len(),
            deadline
        );
        Ok(chores)
    }
}

fn build_chore(request: &NewChore) -> Chore {
    let mut chore = Chore::new(request.name.trim(), request.expected_duration);
    chore.description = request.description.clone();
    chore.category = request.category.clone();
    chore.frequency = request.frequency;
    chore.deadline_date = request.deadline_date;
    chore
}
