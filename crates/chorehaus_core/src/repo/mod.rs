//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record-store contracts the assignment and renewal engines
//!   consume (`ChoreRepository`, `UserRepository`), plus the household
//!   profile store (`HouseholdInfoRepository`).
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Chore::validate()` before persistence.
//! - Repository APIs return semantic errors (`ChoreNotFound`,
//!   `DuplicateChoreId`) in addition to DB transport errors.

pub mod chore_repo;
pub mod household_info_repo;
pub mod household_repo;
pub mod user_repo;
