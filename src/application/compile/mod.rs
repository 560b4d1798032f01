//! Compile Module
//!
//! Reconciles the current sources against the Compiled Registry.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`CompileOptions`)
//! - `result` - Result types (`CompileReport`)
//! - `use_case` - Core use case logic (`CompileUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use hsc::application::compile::{CompileOptions, CompileUseCase};
//!
//! let use_case = CompileUseCase::new(compiler, registry_repo);
//! let report = use_case.execute(&modules, &CompileOptions::new("v0.1.0"))?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::CompileOptions;
pub use result::{CompileReport, ModuleCompileResult};
pub use use_case::CompileUseCase;
