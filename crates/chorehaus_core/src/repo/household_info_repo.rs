//! Household profile persistence.
//!
//! # Invariants
//! - The `household` table holds at most one row (`id = 1`).
//! - `save_household` replaces the profile in place.

use crate::model::household::{Household, HouseholdKind};
use crate::repo::household_repo::{RepoError, RepoResult, SqliteHouseholdRepository};
use rusqlite::{params, OptionalExtension};

/// Record-store contract for the household profile.
pub trait HouseholdInfoRepository {
    /// Returns the profile, or `None` before it was ever saved.
    fn get_household(&self) -> RepoResult<Option<Household>>;
    /// Inserts or replaces the profile.
    fn save_household(&self, household: &Household) -> RepoResult<()>;
}

impl<T: HouseholdInfoRepository + ?Sized> HouseholdInfoRepository for &T {
    fn get_household(&self) -> RepoResult<Option<Household>> {
        (**self).get_household()
    }

    fn save_household(&self, household: &Household) -> RepoResult<()> {
        (**self).save_household(household)
    }
}

impl HouseholdInfoRepository for SqliteHouseholdRepository<'_> {
    fn get_household(&self) -> RepoResult<Option<Household>> {
        let row = self
            .conn
            .query_row(
                "SELECT name, kind, expected_occupants FROM household WHERE id = 1;",
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((name, kind_text, occupants)) = row else {
            return Ok(None);
        };
        let kind = HouseholdKind::parse(&kind_text).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid kind `{kind_text}` in household.kind"))
        })?;
        let expected_occupants = u32::try_from(occupants)
            .ok()
            .filter(|count| *count > 0)
            .ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "out of range value `{occupants}` in household.expected_occupants"
                ))
            })?;

        Ok(Some(Household {
            name,
            kind,
            expected_occupants,
        }))
    }

    fn save_household(&self, household: &Household) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO household (id, name, kind, expected_occupants)
             VALUES (1, ?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                kind = excluded.kind,
                expected_occupants = excluded.expected_occupants,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                household.name.as_str(),
                household.kind.as_str(),
                household.expected_occupants,
            ],
        )?;
        Ok(())
    }
}
