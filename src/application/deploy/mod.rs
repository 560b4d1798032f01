//! Deploy Module
//!
//! Reconciles the Compiled Registry with the Deployed Registry and the live
//! target, in strict tier order.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`DeployOptions`)
//! - `result` - Result types (`DeployReport`)
//! - `use_case` - Core use case logic (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use hsc::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(client, compiled_repo, deployed_repo);
//! let report = use_case.execute(&DeployOptions::new())?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::DeployOptions;
pub use result::{DeployReport, ModuleDeployResult};
pub use use_case::DeployUseCase;
