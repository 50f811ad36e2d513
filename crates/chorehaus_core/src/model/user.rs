//! Household member model.
//!
//! Workload is always derived from chores; nothing about it lives here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque household member identifier.
pub type UserId = String;

/// One occupant of the household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Display name, unique within the household.
    pub name: String,
}

impl User {
    /// Creates a user with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }

    /// Creates a user with a caller-provided id.
    pub fn with_id(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
