//! Identifier generation abstraction.
//!
//! Submission ids are minted through this trait so that tests can inject a
//! predictable sequence instead of random v4 UUIDs.

use uuid::Uuid;

/// Abstraction over unique identifier generation.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh identifier, distinct from every id returned before.
    fn next_id(&self) -> Uuid;
}

/// Production generator backed by random v4 UUIDs.
#[derive(Debug, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}
