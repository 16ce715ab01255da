//! Value types for the Story Progression context.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use mythicloom_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Minimum length of a branch, in characters, after trimming.
pub const MIN_BRANCH_LENGTH: usize = 20;

/// Maximum length of a branch, in characters, after trimming.
pub const MAX_BRANCH_LENGTH: usize = 800;

/// Calendar date (UTC) identifying one active day. Serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// The day key of the UTC calendar date containing `instant`.
    #[must_use]
    pub fn of(instant: DateTime<Utc>) -> Self {
        Self(instant.date_naive())
    }

    /// The underlying calendar date.
    #[must_use]
    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Direction of a single voter's vote on a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    /// +1
    Up,
    /// -1
    Down,
}

impl VoteDirection {
    /// The signed contribution of this direction to a tally.
    #[must_use]
    pub fn delta(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

impl TryFrom<i64> for VoteDirection {
    type Error = DomainError;

    fn try_from(delta: i64) -> Result<Self, Self::Error> {
        match delta {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            _ => Err(DomainError::Validation("delta must be 1 or -1.".to_owned())),
        }
    }
}
