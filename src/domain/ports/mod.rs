//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod compiler;
pub mod reconcile_events;
pub mod registry_repository;
pub mod target_client;

pub use compiler::{CompileError, Compiler};
pub use reconcile_events::{NoopEventSink, ReconcileEvent, ReconcileEventSink};
pub use registry_repository::{RegistryError, RegistryLock, RegistryRepository, RegistryResult};
pub use target_client::{is_zero_balance, AccountState, TargetClient, TargetError};
