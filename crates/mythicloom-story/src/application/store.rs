//! Shared, lock-guarded home of the single story engine.

use std::sync::{Arc, RwLock};

use mythicloom_core::error::DomainError;

use crate::domain::aggregates::StoryEngine;

/// Cloneable handle to the one `StoryEngine` of the process.
///
/// Mutations run under the write lock for their whole read-modify-write,
/// reads under the read lock, so callers never observe a half-applied
/// operation.
#[derive(Debug, Clone)]
pub struct StoryStore {
    engine: Arc<RwLock<StoryEngine>>,
}

impl StoryStore {
    /// Wraps an engine for sharing across request handlers.
    #[must_use]
    pub fn new(engine: StoryEngine) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }

    /// Runs `f` with shared access to the engine.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the lock is poisoned.
    pub fn read<R>(&self, f: impl FnOnce(&StoryEngine) -> R) -> Result<R, DomainError> {
        let engine = self
            .engine
            .read()
            .map_err(|_| DomainError::Infrastructure("story state lock poisoned".to_owned()))?;
        Ok(f(&engine))
    }

    /// Runs `f` with exclusive access to the engine.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the lock is poisoned.
    pub fn write<R>(&self, f: impl FnOnce(&mut StoryEngine) -> R) -> Result<R, DomainError> {
        let mut engine = self
            .engine
            .write()
            .map_err(|_| DomainError::Infrastructure("story state lock poisoned".to_owned()))?;
        Ok(f(&mut engine))
    }
}
