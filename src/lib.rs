//! hsc - compile and deploy reconciler for Horde Smart Contract modules
//!
//! hsc keeps two registries in step with a fixed set of contract modules:
//! the compiled registry (last compiled payload per module) and the deployed
//! registry (last confirmed deployment per module). Re-running either step
//! with nothing changed is a no-op; a changed module redeploys itself and
//! every module after it.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod ui;

// Re-exports for convenience
pub use application::{
    CompileOptions, CompileReport, CompileUseCase, DeployOptions, DeployReport, DeployUseCase,
};
pub use config::Config;
pub use domain::entities::{
    CompiledRecord, CompiledRegistry, DeployedRecord, DeployedRegistry, Module, ModuleSet,
};
pub use domain::services::{plan_cascade, DeployDecision, DeployReason, DriftStatus};
pub use domain::value_objects::{Payload, Tier};
pub use error::{HscError, HscResult};
