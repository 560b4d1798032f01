//! Deploy Result

use crate::domain::entities::DeployedRegistry;
use crate::domain::services::{DeployDecision, DriftStatus};
use crate::domain::value_objects::Tier;

/// Outcome for one module, in deployment order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDeployResult {
    pub key: String,
    pub tier: Tier,
    pub decision: DeployDecision,
    /// Address after this run (`None` only for planned deployments in a dry run)
    pub address: Option<String>,
}

/// Result of a deploy run
#[derive(Debug, Clone)]
pub struct DeployReport {
    /// New Deployed Registry (persisted by `execute` unless dry run)
    pub registry: DeployedRegistry,
    /// Root address after this run
    pub root_address: Option<String>,
    /// Drift check result
    pub drift: DriftStatus,
    /// Whether the run started with every module forced
    pub force_all: bool,
    /// Per-module outcomes in deployment order
    pub outcomes: Vec<ModuleDeployResult>,
    /// Keys dropped because they are no longer compiled
    pub pruned: Vec<String>,
    /// Whether the version synchronization call was issued
    pub version_synced: bool,
    pub dry_run: bool,
}

impl DeployReport {
    /// Keys that were (or would be) deployed, in order
    pub fn deployed_keys(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.decision.is_deploy())
            .map(|o| o.key.as_str())
            .collect()
    }

    pub fn deployed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.decision.is_deploy()).count()
    }

    /// True when nothing was deployed and no call was made
    pub fn is_noop(&self) -> bool {
        self.deployed_count() == 0 && !self.version_synced
    }
}
