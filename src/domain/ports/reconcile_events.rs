//! Reconcile Event Port
//!
//! Provides an observable interface for compile and deploy runs.
//! Events are emitted in the fixed processing order so the output can be
//! audited module by module.

use std::path::PathBuf;

use crate::domain::services::{CompileOutcome, DeployDecision, DeployReason, DriftStatus};

/// Event emitted during a compile or deploy run
#[derive(Debug, Clone)]
pub enum ReconcileEvent {
    /// Compile run started
    CompileStarted { module_count: usize },

    /// One module was compiled and compared
    ModuleCompiled {
        index: usize,
        key: String,
        source: PathBuf,
        outcome: CompileOutcome,
        digest: String,
    },

    /// Records of modules no longer in the set were dropped
    RegistryPruned { keys: Vec<String> },

    /// Compile run finished and the registry was persisted
    CompileFinished {
        changed_count: usize,
        tool_version: String,
    },

    /// Deploy run started
    DeployStarted {
        module_count: usize,
        tool_version: String,
        dry_run: bool,
    },

    /// Signing account was read before any submission
    AccountChecked {
        address: String,
        nonce: u64,
        balance: String,
    },

    /// Drift check completed
    DriftChecked { status: DriftStatus, force_all: bool },

    /// A module deployment was submitted
    ModuleDeploying {
        index: usize,
        key: String,
        reason: DeployReason,
    },

    /// One module was reconciled
    ModuleReconciled {
        index: usize,
        key: String,
        decision: DeployDecision,
        address: Option<String>,
    },

    /// Version was written to the root module
    VersionSynced { address: String, version: String },

    /// Deploy run finished and the registry was persisted
    DeployFinished {
        root_address: Option<String>,
        deployed_count: usize,
        dry_run: bool,
    },
}

/// Trait for receiving reconcile events
///
/// Implementations can be:
/// - ConsoleEventSink: human readable progress
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait ReconcileEventSink: Send + Sync {
    /// Handle an event
    fn on_event(&self, event: ReconcileEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl ReconcileEventSink for NoopEventSink {
    fn on_event(&self, _event: ReconcileEvent) {}
}
