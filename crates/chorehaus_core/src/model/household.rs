//! Household profile model.
//!
//! One store holds exactly one household. Its members are the users in the
//! same store, so the occupant count is derived and never stored here.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Kind of dwelling the household lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseholdKind {
    Condo,
    Apt,
    House,
}

impl HouseholdKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Condo => "condo",
            Self::Apt => "apt",
            Self::House => "house",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "condo" => Some(Self::Condo),
            "apt" => Some(Self::Apt),
            "house" => Some(Self::House),
            _ => None,
        }
    }
}

impl Display for HouseholdKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive profile of the household a store belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Household {
    pub name: String,
    pub kind: HouseholdKind,
    /// Number of people the household was set up for; always positive.
    pub expected_occupants: u32,
}
