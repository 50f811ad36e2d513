//! Household profile use-case service.

use crate::model::household::{Household, HouseholdKind};
use crate::repo::household_info_repo::HouseholdInfoRepository;
use crate::repo::user_repo::UserRepository;
use crate::service::error::{ServiceError, ServiceResult};
use log::info;
use serde::Serialize;

/// Profile plus the members currently registered in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HouseholdSummary {
    pub household: Household,
    pub occupants: usize,
    /// Places still free against `expected_occupants`; never negative.
    pub open_places: u32,
}

/// Household service facade over repository implementations.
pub struct HouseholdService<R> {
    repo: R,
}

impl<R: HouseholdInfoRepository + UserRepository> HouseholdService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Sets the household name, dwelling kind and expected occupant count.
    ///
    /// Calling it again replaces the previous profile.
    pub fn configure_household(
        &self,
        name: &str,
        kind: HouseholdKind,
        expected_occupants: u32,
    ) -> ServiceResult<Household> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::InvalidHouseholdName);
        }
        if expected_occupants == 0 {
            return Err(ServiceError::InvalidOccupantCount);
        }

        let household = Household {
            name: name.to_string(),
            kind,
            expected_occupants,
        };
        self.repo.save_household(&household)?;
        info!(
            "event=household_configure module=service status=ok kind={} expected_occupants={}",
            household.kind, household.expected_occupants
        );
        Ok(household)
    }

    /// Returns the profile with its live occupant count, if configured.
    pub fn household_summary(&self) -> ServiceResult<Option<HouseholdSummary>> {
        let Some(household) = self.repo.get_household()? else {
            return Ok(None);
        };
        let occupants = self.repo.list_user_ids()?.len();
        let registered = u32::try_from(occupants).unwrap_or(u32::MAX);

        Ok(Some(HouseholdSummary {
            open_places: household.expected_occupants.saturating_sub(registered),
            household,
            occupants,
        }))
    }
}
