//! Domain Entities
//!
//! Core domain entities that have identity and lifecycle.
//! - `Module` / `ModuleSet` - The fixed set of deployable units
//! - `CompiledRegistry` - Last known compiled payload per module
//! - `DeployedRegistry` - Last confirmed deployment per module

mod compiled_registry;
mod deployed_registry;
mod module;

pub use compiled_registry::{CompiledRecord, CompiledRegistry};
pub use deployed_registry::{DeployedRecord, DeployedRegistry};
pub use module::{
    Module, ModuleSet, HSC_CMD, HSC_CONFIG, HSC_DB, HSC_META, HSC_POND, HSC_RESULT,
};
