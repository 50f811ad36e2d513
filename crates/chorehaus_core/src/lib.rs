//! Core domain logic for ChoreHaus.
//! This crate is the single source of truth for chore lifecycle invariants
//! and the assignment/renewal engines.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::EngineConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::chore::{
    is_storable_date, Chore, ChoreId, ChoreStatus, ChoreValidationError, STORABLE_YEARS,
};
pub use model::chore_id::{increment_id, ChoreIdError};
pub use model::household::{Household, HouseholdKind};
pub use model::user::{User, UserId};
pub use repo::chore_repo::{ChoreQuery, ChoreRepository};
pub use repo::household_info_repo::HouseholdInfoRepository;
pub use repo::household_repo::{RepoError, RepoResult, SqliteHouseholdRepository};
pub use repo::user_repo::UserRepository;
pub use service::assignment_service::{
    Assignment, AssignmentReport, AssignmentService, UserWorkload,
};
pub use service::chore_service::{ChoreService, NewChore};
pub use service::error::{ServiceError, ServiceResult};
pub use service::household_service::{HouseholdService, HouseholdSummary};
pub use service::renewal_service::{successor_of, Renewal, RenewalReport, RenewalService};
pub use service::user_service::UserService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
