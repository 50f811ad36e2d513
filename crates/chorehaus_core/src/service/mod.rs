//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Host the assignment and renewal engines.
//! - Keep callers decoupled from storage details.

pub mod assignment_service;
pub mod chore_service;
pub mod error;
pub mod household_service;
pub mod renewal_service;
pub mod user_service;
