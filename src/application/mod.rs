//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `CompileUseCase` - Compiles every module and updates the Compiled Registry
//! - `DeployUseCase` - Drift check, cascading deploy, version sync, Deployed Registry

pub mod compile;
pub mod deploy;

pub use compile::{CompileOptions, CompileReport, CompileUseCase, ModuleCompileResult};
pub use deploy::{DeployOptions, DeployReport, DeployUseCase, ModuleDeployResult};
