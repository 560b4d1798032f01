//! RegistryRepository port - persistence of the compiled/deployed registries
//!
//! Implementations must write atomically: a failed save leaves the previous
//! file intact. A missing file loads as an empty registry. A run that rewrites
//! a registry holds its `lock` from load until after save.

use std::any::Any;
use std::path::PathBuf;

/// Result type for registry persistence
pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Failed to access registry: {message}")]
    AccessError { message: String },

    #[error("Failed to serialize registry: {message}")]
    SerializationError { message: String },

    #[error(
        "registry file corrupted: {path}\n  → Fix: restore it from version control or delete it\n  → Details: {message}"
    )]
    Corrupted { path: PathBuf, message: String },

    #[error(
        "registry {path} is in use by another hsc run\n  → Fix: wait for it to finish, then run again"
    )]
    Locked { path: PathBuf },
}

/// Exclusive hold on one registry, released when dropped
pub struct RegistryLock {
    guard: Option<Box<dyn Any>>,
}

impl RegistryLock {
    /// A lock with nothing behind it, for storage no other process can see
    pub fn unheld() -> Self {
        Self { guard: None }
    }

    /// Keep `guard` alive until this lock is dropped
    pub fn holding(guard: impl Any) -> Self {
        Self {
            guard: Some(Box::new(guard)),
        }
    }
}

impl std::fmt::Debug for RegistryLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryLock")
            .field("held", &self.guard.is_some())
            .finish()
    }
}

/// Abstract repository for one registry file
pub trait RegistryRepository {
    /// Registry type stored by this repository
    type Registry;

    /// Load the registry, or an empty one if nothing was persisted yet
    fn load(&self) -> RegistryResult<Self::Registry>;

    /// Replace the persisted registry atomically
    fn save(&self, registry: &Self::Registry) -> RegistryResult<()>;

    /// Take the registry for a whole load-modify-save run
    ///
    /// Fails with `RegistryError::Locked` instead of waiting when another
    /// process holds it.
    fn lock(&self) -> RegistryResult<RegistryLock> {
        Ok(RegistryLock::unheld())
    }
}

impl<R: RegistryRepository + ?Sized> RegistryRepository for &R {
    type Registry = R::Registry;

    fn load(&self) -> RegistryResult<Self::Registry> {
        (**self).load()
    }

    fn save(&self, registry: &Self::Registry) -> RegistryResult<()> {
        (**self).save(registry)
    }

    fn lock(&self) -> RegistryResult<RegistryLock> {
        (**self).lock()
    }
}
