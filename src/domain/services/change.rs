//! Compile-time change detection
//!
//! Compares a freshly compiled payload against the prior record for the same
//! key. Each module is judged on its own; there is no cascade at compile time.

use serde::Serialize;

use crate::domain::entities::CompiledRecord;
use crate::domain::value_objects::Payload;

/// Why a module's compiled record was replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompileReason {
    /// No prior record for this key
    New,
    /// Payload differs from the prior record
    Changed,
    /// Replacement requested explicitly
    Forced,
}

impl CompileReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompileReason::New => "new",
            CompileReason::Changed => "changed",
            CompileReason::Forced => "forced",
        }
    }
}

/// Outcome of reconciling one module at compile time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileOutcome {
    Unchanged,
    Compiled(CompileReason),
}

impl CompileOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, CompileOutcome::Compiled(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompileOutcome::Unchanged => "unchanged",
            CompileOutcome::Compiled(reason) => reason.as_str(),
        }
    }
}

/// Decide whether `payload` replaces `prior`
pub fn detect_change(prior: Option<&CompiledRecord>, payload: &Payload, force: bool) -> CompileOutcome {
    match prior {
        None => CompileOutcome::Compiled(CompileReason::New),
        Some(record) if record.payload() != payload => {
            CompileOutcome::Compiled(CompileReason::Changed)
        }
        Some(_) if force => CompileOutcome::Compiled(CompileReason::Forced),
        Some(_) => CompileOutcome::Unchanged,
    }
}
