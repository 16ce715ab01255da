//! Test id generators — deterministic `IdGenerator` implementations.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use mythicloom_core::id::IdGenerator;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::{Builder, Uuid};

/// Yields `00000000-0000-0000-0000-000000000001`, `...0002`, and so on.
/// Ids therefore sort in creation order.
#[derive(Debug, Default)]
pub struct SequenceIdGenerator {
    next: AtomicU64,
}

impl SequenceIdGenerator {
    /// Create a generator whose first id is `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next_id(&self) -> Uuid {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        Uuid::from_u128(u128::from(n))
    }
}

/// Random-looking v4 ids from a seeded RNG, repeatable across runs.
#[derive(Debug)]
pub struct SeededIdGenerator {
    rng: Mutex<StdRng>,
}

impl SeededIdGenerator {
    /// Create a generator seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl IdGenerator for SeededIdGenerator {
    fn next_id(&self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.lock().unwrap().fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid()
    }
}
