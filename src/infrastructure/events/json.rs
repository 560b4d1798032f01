//! JSON Event Sink
//!
//! Outputs reconcile events as NDJSON for CI/automation consumption.

use crate::domain::ports::{ReconcileEvent, ReconcileEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// Render one event as a JSON object
pub fn event_to_json(event: &ReconcileEvent) -> serde_json::Value {
    match event {
        ReconcileEvent::CompileStarted { module_count } => serde_json::json!({
            "event": "start",
            "command": "compile",
            "module_count": module_count,
        }),

        ReconcileEvent::ModuleCompiled {
            index,
            key,
            source,
            outcome,
            digest,
        } => serde_json::json!({
            "event": "module_compiled",
            "command": "compile",
            "index": index,
            "key": key,
            "source": source.display().to_string(),
            "outcome": outcome.as_str(),
            "changed": outcome.is_changed(),
            "digest": digest,
        }),

        ReconcileEvent::RegistryPruned { keys } => serde_json::json!({
            "event": "registry_pruned",
            "keys": keys,
        }),

        ReconcileEvent::CompileFinished {
            changed_count,
            tool_version,
        } => serde_json::json!({
            "event": "complete",
            "command": "compile",
            "status": "success",
            "changed": changed_count,
            "tool_version": tool_version,
        }),

        ReconcileEvent::DeployStarted {
            module_count,
            tool_version,
            dry_run,
        } => serde_json::json!({
            "event": "start",
            "command": "deploy",
            "module_count": module_count,
            "tool_version": tool_version,
            "dry_run": dry_run,
        }),

        ReconcileEvent::AccountChecked {
            address,
            nonce,
            balance,
        } => serde_json::json!({
            "event": "account_checked",
            "command": "deploy",
            "address": address,
            "nonce": nonce,
            "balance": balance,
        }),

        ReconcileEvent::DriftChecked { status, force_all } => serde_json::json!({
            "event": "drift_checked",
            "command": "deploy",
            "drift": serde_json::to_value(status).unwrap_or(serde_json::Value::Null),
            "force_all": force_all,
        }),

        ReconcileEvent::ModuleDeploying { index, key, reason } => serde_json::json!({
            "event": "item_start",
            "command": "deploy",
            "index": index,
            "key": key,
            "reason": reason.as_str(),
        }),

        ReconcileEvent::ModuleReconciled {
            index,
            key,
            decision,
            address,
        } => serde_json::json!({
            "event": "module_reconciled",
            "command": "deploy",
            "index": index,
            "key": key,
            "decision": decision.as_str(),
            "deployed": decision.is_deploy(),
            "address": address,
        }),

        ReconcileEvent::VersionSynced { address, version } => serde_json::json!({
            "event": "version_synced",
            "command": "deploy",
            "address": address,
            "version": version,
        }),

        ReconcileEvent::DeployFinished {
            root_address,
            deployed_count,
            dry_run,
        } => serde_json::json!({
            "event": "complete",
            "command": "deploy",
            "status": "success",
            "root_address": root_address,
            "deployed": deployed_count,
            "dry_run": dry_run,
        }),
    }
}

impl ReconcileEventSink for JsonEventSink {
    fn on_event(&self, event: ReconcileEvent) {
        self.write_event(event_to_json(&event));
    }
}
