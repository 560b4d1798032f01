//! Deploy Use Case
//!
//! Orchestrates the deploy flow:
//! 0. Account check: an unfunded signing account aborts before any submission
//! 1. Drift check (tool versions, then the live version on the root)
//! 2. Prune deployed records of modules that are no longer compiled
//! 3. Deploy root, dependent-primary, then regular modules, cascading
//! 4. Synchronize the version on the root unless the run was a no-op
//! 5. Persist the new Deployed Registry
//!
//! Any deployment or call failure aborts before step 5: the registry on
//! disk stays authoritative until a full run completes. The Deployed
//! Registry stays locked from load until after the save.

use std::sync::Arc;

use crate::domain::entities::{CompiledRegistry, DeployedRecord, DeployedRegistry};
use crate::domain::ports::{
    NoopEventSink, ReconcileEvent, ReconcileEventSink, RegistryRepository, TargetClient,
};
use crate::domain::services::{
    check_drift, plan_cascade, DeployDecision, GET_VERSION, SET_VERSION,
};
use crate::error::{HscError, HscResult};

use super::options::DeployOptions;
use super::result::{DeployReport, ModuleDeployResult};

/// Deploy use case - reconciles compiled, deployed and live state
pub struct DeployUseCase<T, CR, DR>
where
    T: TargetClient,
    CR: RegistryRepository<Registry = CompiledRegistry>,
    DR: RegistryRepository<Registry = DeployedRegistry>,
{
    client: T,
    compiled_repo: CR,
    deployed_repo: DR,
}

impl<T, CR, DR> DeployUseCase<T, CR, DR>
where
    T: TargetClient,
    CR: RegistryRepository<Registry = CompiledRegistry>,
    DR: RegistryRepository<Registry = DeployedRegistry>,
{
    pub fn new(client: T, compiled_repo: CR, deployed_repo: DR) -> Self {
        Self {
            client,
            compiled_repo,
            deployed_repo,
        }
    }

    /// Load both registries, reconcile and persist
    pub fn execute(&self, options: &DeployOptions) -> HscResult<DeployReport> {
        self.execute_with_events(options, Arc::new(NoopEventSink))
    }

    /// Load both registries, reconcile and persist, reporting to `event_sink`
    pub fn execute_with_events(
        &self,
        options: &DeployOptions,
        event_sink: Arc<dyn ReconcileEventSink>,
    ) -> HscResult<DeployReport> {
        let _lock = self.deployed_repo.lock()?;
        let compiled = self.compiled_repo.load()?;
        let prior = self.deployed_repo.load()?;

        let report = self.reconcile(&compiled, prior, options, event_sink.as_ref())?;

        if !options.dry_run {
            // unconditional: keeps pruning and address discovery even on a no-op
            self.deployed_repo.save(&report.registry)?;
        }

        event_sink.on_event(ReconcileEvent::DeployFinished {
            root_address: report.root_address.clone(),
            deployed_count: report.deployed_count(),
            dry_run: options.dry_run,
        });

        Ok(report)
    }

    /// Reconcile without touching persistence
    pub fn reconcile(
        &self,
        compiled: &CompiledRegistry,
        prior: DeployedRegistry,
        options: &DeployOptions,
        event_sink: &dyn ReconcileEventSink,
    ) -> HscResult<DeployReport> {
        let tool_version = compiled
            .tool_version()
            .ok_or(HscError::MissingToolVersion)?
            .to_string();
        if compiled.root().is_none() {
            return Err(HscError::MissingRoot);
        }

        event_sink.on_event(ReconcileEvent::DeployStarted {
            module_count: compiled.len(),
            tool_version: tool_version.clone(),
            dry_run: options.dry_run,
        });

        if !options.skip_balance_check {
            let account = self
                .client
                .account_state()
                .map_err(HscError::AccountState)?;
            event_sink.on_event(ReconcileEvent::AccountChecked {
                address: account.address.clone(),
                nonce: account.nonce,
                balance: account.balance.clone(),
            });
            if account.is_unfunded() && !options.dry_run {
                return Err(HscError::InsufficientBalance {
                    address: account.address,
                });
            }
        }

        let drift = check_drift(
            &tool_version,
            prior.tool_version(),
            prior.root_address(),
            |address| {
                self.client
                    .query(address, GET_VERSION, &[])
                    .map_err(|e| e.to_string())
            },
        );
        let force_all = options.force || drift.forces_redeploy();
        event_sink.on_event(ReconcileEvent::DriftChecked {
            status: drift.clone(),
            force_all,
        });

        let mut registry = prior;
        let pruned = registry.prune(|key| compiled.contains(key));
        if !pruned.is_empty() {
            event_sink.on_event(ReconcileEvent::RegistryPruned {
                keys: pruned.clone(),
            });
        }

        let order = compiled.deploy_order();
        let plan = plan_cascade(
            order
                .iter()
                .map(|&(key, record)| (record.payload(), registry.get(key))),
            force_all,
        );
        let mut root_address: Option<String> = None;
        let mut outcomes = Vec::with_capacity(compiled.len());

        for (index, ((key, record), decision)) in order.into_iter().zip(plan).enumerate() {
            let address = match decision {
                DeployDecision::Skip => registry.get(key).map(|r| r.address().to_string()),
                DeployDecision::Deploy(_) if options.dry_run => None,
                DeployDecision::Deploy(reason) => {
                    let args = if record.tier().takes_root_address() {
                        vec![root_address.clone().ok_or(HscError::MissingRoot)?]
                    } else {
                        Vec::new()
                    };

                    event_sink.on_event(ReconcileEvent::ModuleDeploying {
                        index,
                        key: key.to_string(),
                        reason,
                    });

                    let address = self
                        .client
                        .deploy(record.payload(), &args)
                        .map_err(|source| HscError::Deploy {
                            key: key.to_string(),
                            source,
                        })?;
                    registry.insert(key, DeployedRecord::new(record.payload().clone(), &address));
                    Some(address)
                }
            };

            if record.tier().is_root() {
                root_address = address.clone();
            }

            event_sink.on_event(ReconcileEvent::ModuleReconciled {
                index,
                key: key.to_string(),
                decision,
                address: address.clone(),
            });
            outcomes.push(ModuleDeployResult {
                key: key.to_string(),
                tier: record.tier(),
                decision,
                address,
            });
        }

        let any_deployed = outcomes.iter().any(|o| o.decision.is_deploy());
        let mut version_synced = false;
        if (any_deployed || !drift.is_in_sync()) && !options.dry_run {
            let address = root_address.clone().ok_or(HscError::MissingRoot)?;
            self.client
                .call(&address, SET_VERSION, std::slice::from_ref(&tool_version))
                .map_err(|source| HscError::VersionSync {
                    address: address.clone(),
                    source,
                })?;
            version_synced = true;
            event_sink.on_event(ReconcileEvent::VersionSynced {
                address,
                version: tool_version.clone(),
            });
        }

        if !options.dry_run {
            registry.set_tool_version(Some(tool_version));
            if let Some(address) = &root_address {
                registry.set_root_address(address.clone());
            }
        }

        Ok(DeployReport {
            registry,
            root_address,
            drift,
            force_all,
            outcomes,
            pruned,
            version_synced,
            dry_run: options.dry_run,
        })
    }
}
