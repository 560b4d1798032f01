//! Compile Result

use std::collections::BTreeSet;

use crate::domain::entities::CompiledRegistry;
use crate::domain::services::CompileOutcome;

/// Outcome for one module, in processing order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCompileResult {
    pub key: String,
    pub outcome: CompileOutcome,
}

/// Result of a compile run
#[derive(Debug, Clone)]
pub struct CompileReport {
    /// Updated registry (already persisted by `execute`)
    pub registry: CompiledRegistry,
    /// Keys whose record was replaced
    pub changed: BTreeSet<String>,
    /// Per-module outcomes in processing order
    pub outcomes: Vec<ModuleCompileResult>,
    /// Keys dropped because they left the module set
    pub pruned: Vec<String>,
}

impl CompileReport {
    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty() || !self.pruned.is_empty()
    }

    pub fn changed_count(&self) -> usize {
        self.changed.len()
    }
}
