//! Deploy decisions and the one-directional cascade
//!
//! Modules are visited in deployment order. Once any module is redeployed,
//! every later module is redeployed in the same run: the cascade only turns
//! on, never off. The running state is threaded explicitly through the loop.

use serde::Serialize;

use crate::domain::entities::DeployedRecord;
use crate::domain::value_objects::Payload;

/// Why a module is (re)deployed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployReason {
    /// No confirmed deployment recorded for this key
    NotDeployed,
    /// Compiled payload differs from the last deployed payload
    PayloadChanged,
    /// An earlier module was redeployed in this run
    Cascade,
    /// Drift or an explicit request forced a full redeploy
    Forced,
}

impl DeployReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeployReason::NotDeployed => "not_deployed",
            DeployReason::PayloadChanged => "payload_changed",
            DeployReason::Cascade => "cascade",
            DeployReason::Forced => "forced",
        }
    }
}

/// Decision for one module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployDecision {
    Skip,
    Deploy(DeployReason),
}

impl DeployDecision {
    pub fn is_deploy(&self) -> bool {
        matches!(self, DeployDecision::Deploy(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeployDecision::Skip => "skip",
            DeployDecision::Deploy(reason) => reason.as_str(),
        }
    }
}

/// Cascade state carried from one module to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeState {
    force_all: bool,
    upstream_deployed: bool,
}

impl CascadeState {
    /// Initial state of a run
    pub fn start(force_all: bool) -> Self {
        Self {
            force_all,
            upstream_deployed: false,
        }
    }

    /// Whether later modules must be redeployed regardless of their payload
    pub fn is_cascading(&self) -> bool {
        self.force_all || self.upstream_deployed
    }

    /// State after a module was processed
    #[must_use]
    pub fn advance(self, deployed: bool) -> Self {
        Self {
            force_all: self.force_all,
            upstream_deployed: self.upstream_deployed || deployed,
        }
    }

    /// Decide whether `compiled` must be deployed given the prior record
    pub fn decide(&self, compiled: &Payload, prior: Option<&DeployedRecord>) -> DeployDecision {
        match prior {
            None => DeployDecision::Deploy(DeployReason::NotDeployed),
            Some(record) if record.payload() != compiled => {
                DeployDecision::Deploy(DeployReason::PayloadChanged)
            }
            Some(_) if self.upstream_deployed => DeployDecision::Deploy(DeployReason::Cascade),
            Some(_) if self.force_all => DeployDecision::Deploy(DeployReason::Forced),
            Some(_) => DeployDecision::Skip,
        }
    }
}

/// Plan a whole run assuming every deployment succeeds
///
/// `modules` are `(compiled payload, prior record)` pairs in deployment order.
pub fn plan_cascade<'a, I>(modules: I, force_all: bool) -> Vec<DeployDecision>
where
    I: IntoIterator<Item = (&'a Payload, Option<&'a DeployedRecord>)>,
{
    let mut state = CascadeState::start(force_all);
    modules
        .into_iter()
        .map(|(payload, prior)| {
            let decision = state.decide(payload, prior);
            state = state.advance(decision.is_deploy());
            decision
        })
        .collect()
}
