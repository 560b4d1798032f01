//! Compiler port - abstraction over the external artifact compiler
//!
//! The compiler must be deterministic: same source bytes, same payload.

use std::path::Path;

use crate::domain::value_objects::Payload;

/// Errors reported by a compiler invocation
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CompileError {
    /// Compiler executable could not be located
    #[error("compiler not found: {0}")]
    NotFound(String),

    /// Compiler could not be started or crashed
    #[error("failed to run compiler: {0}")]
    Spawn(String),

    /// Compiler ran and reported errors
    #[error("compiler reported errors: {0}")]
    Failed(String),

    /// Compiler succeeded but produced nothing
    #[error("compiler produced an empty payload")]
    EmptyPayload,
}

/// Turns a source location into a compiled payload
pub trait Compiler {
    /// Compile the module at `source`
    fn compile(&self, source: &Path) -> Result<Payload, CompileError>;

    /// Whether `source` can be handed to the compiler
    fn source_exists(&self, source: &Path) -> bool {
        source.is_file()
    }
}

impl<C: Compiler + ?Sized> Compiler for &C {
    fn compile(&self, source: &Path) -> Result<Payload, CompileError> {
        (**self).compile(source)
    }

    fn source_exists(&self, source: &Path) -> bool {
        (**self).source_exists(source)
    }
}
