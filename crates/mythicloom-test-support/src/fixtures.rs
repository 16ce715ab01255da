//! Shared fixtures.

use chrono::{DateTime, TimeZone, Utc};

/// A branch that comfortably satisfies the length bounds.
pub const BRANCH_TEXT: &str = "Heroes gather at dawn ready to defend their cause.";

/// The instant most tests freeze their clock at: 2026-01-15T10:00:00Z.
#[must_use]
#[allow(clippy::missing_panics_doc)]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// A branch text of exactly `len` characters.
#[must_use]
pub fn branch_of_len(len: usize) -> String {
    "a".repeat(len)
}
