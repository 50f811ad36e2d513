//! Household domain model.
//!
//! # Responsibility
//! - Define canonical chore, user and household records used by core
//!   business logic.
//! - Own the chore id lineage scheme used across renewals.
//!
//! # Invariants
//! - Every chore id is unique across the store and never reused.
//! - Status and dates are typed here; string forms exist only at storage
//!   and wire boundaries.

pub mod chore;
pub mod chore_id;
pub mod household;
pub mod user;
