//! Shared test doubles and fixtures for the Mythicloom story engine.

mod clock;
mod fixtures;
mod id;

pub use clock::{FixedClock, ManualClock};
pub use fixtures::{BRANCH_TEXT, branch_of_len, fixed_now};
pub use id::{SeededIdGenerator, SequenceIdGenerator};
