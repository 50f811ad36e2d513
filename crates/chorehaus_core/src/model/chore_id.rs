//! Chore identifier lineage scheme.
//!
//! A chore id is a base token of word characters and hyphens, optionally
//! followed by a parenthesised repetition counter: `base`, `base(1)`,
//! `base(2)`, ... Each renewal moves the lineage one step along that chain.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static CHORE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([\w-]+)(?:\((\d+)\))?$").expect("valid chore id regex"));

/// Identifier increment failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoreIdError {
    /// Input does not match `token` or `token(n)`.
    Malformed(String),
}

impl Display for ChoreIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(id) => write!(f, "malformed chore id `{id}`"),
        }
    }
}

impl Error for ChoreIdError {}

/// Generates a base id for a brand-new lineage.
pub fn new_chore_id() -> String {
    Uuid::new_v4().to_string()
}

/// Returns whether `id` has the lineage shape.
pub fn is_valid_chore_id(id: &str) -> bool {
    CHORE_ID_RE.is_match(id)
}

/// Derives the id of the next chore in the lineage.
///
/// - `abc` -> `abc(1)`
/// - `abc(n)` -> `abc(n+1)`
///
/// # Errors
/// - `ChoreIdError::Malformed` for any other shape, or when the counter
///   does not fit in `u64` after incrementing.
pub fn increment_id(id: &str) -> Result<String, ChoreIdError> {
    let caps = CHORE_ID_RE
        .captures(id)
        .ok_or_else(|| ChoreIdError::Malformed(id.to_string()))?;
    let base = &caps[1];

    let next = match caps.get(2) {
        None => 1,
        Some(counter) => counter
            .as_str()
            .parse::<u64>()
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| ChoreIdError::Malformed(id.to_string()))?,
    };

    Ok(format!("{base}({next})"))
}
