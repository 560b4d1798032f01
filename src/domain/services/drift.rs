//! Drift detection between local deployed records and the live target
//!
//! A failed or inconclusive query never lets a run skip a deployment: it is
//! classified as `QueryFailed`, which forces a full redeploy.

use serde::Serialize;

/// Function queried on the root module to read the live version
pub const GET_VERSION: &str = "getVersion";
/// Function called on the root module to record the deployed version
pub const SET_VERSION: &str = "setVersion";

/// Result of comparing local state with the live target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DriftStatus {
    /// Live version contains the compiled tool version
    InSync { reported: String },
    /// Compiled and deployed registries disagree on the tool version
    LocalStale {
        compiled: String,
        deployed: Option<String>,
    },
    /// Live target reports a different version (redeployed out of band)
    RemoteMismatch { expected: String, reported: String },
    /// Version query failed; treated as drift
    QueryFailed { reason: String },
    /// No root address recorded, nothing to query
    Unverified,
}

impl DriftStatus {
    /// Whether every module must be redeployed
    pub fn forces_redeploy(&self) -> bool {
        matches!(
            self,
            DriftStatus::LocalStale { .. }
                | DriftStatus::RemoteMismatch { .. }
                | DriftStatus::QueryFailed { .. }
        )
    }

    /// Whether the live version is known to match already
    pub fn is_in_sync(&self) -> bool {
        matches!(self, DriftStatus::InSync { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            DriftStatus::InSync { .. } => "in sync",
            DriftStatus::LocalStale { .. } => "local registry stale",
            DriftStatus::RemoteMismatch { .. } => "remote version differs",
            DriftStatus::QueryFailed { .. } => "version query failed",
            DriftStatus::Unverified => "root address unknown",
        }
    }
}

/// Classify drift
///
/// `query_version` is only invoked when the tool versions agree and a root
/// address is known.
pub fn check_drift<Q>(
    compiled_version: &str,
    deployed_version: Option<&str>,
    root_address: Option<&str>,
    query_version: Q,
) -> DriftStatus
where
    Q: FnOnce(&str) -> Result<String, String>,
{
    if deployed_version != Some(compiled_version) {
        return DriftStatus::LocalStale {
            compiled: compiled_version.to_string(),
            deployed: deployed_version.map(str::to_string),
        };
    }

    let Some(address) = root_address else {
        return DriftStatus::Unverified;
    };

    match query_version(address) {
        Ok(reported) if reported.contains(compiled_version) => DriftStatus::InSync { reported },
        Ok(reported) => DriftStatus::RemoteMismatch {
            expected: compiled_version.to_string(),
            reported,
        },
        Err(reason) => DriftStatus::QueryFailed { reason },
    }
}
