//! Mythicloom — Story Progression bounded context.
//!
//! Responsible for the daily cycle of the collaborative story: accepting
//! branch submissions for the active day, attributing and toggling votes per
//! voter, and promoting the winning branch into the canon when the day is
//! finalized.

pub mod application;
pub mod domain;
