//! Compile Use Case
//!
//! Orchestrates the compile flow:
//! 1. Lock and load the prior Compiled Registry
//! 2. Check every source exists (input errors abort before any mutation)
//! 3. Compile each module and compare against its prior record
//! 4. Drop records of modules no longer in the set, stamp the tool version
//! 5. Persist the registry atomically
//!
//! Any compiler failure aborts the run before step 5, so the registry on
//! disk stays the last known good one. The lock is held until after the
//! save, so overlapping runs cannot drop each other's records.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::entities::{CompiledRecord, CompiledRegistry, ModuleSet};
use crate::domain::ports::{
    Compiler, NoopEventSink, ReconcileEvent, ReconcileEventSink, RegistryRepository,
};
use crate::domain::services::detect_change;
use crate::error::{HscError, HscResult};

use super::options::CompileOptions;
use super::result::{CompileReport, ModuleCompileResult};

/// Compile use case - reconciles sources with the Compiled Registry
pub struct CompileUseCase<C, R>
where
    C: Compiler,
    R: RegistryRepository<Registry = CompiledRegistry>,
{
    compiler: C,
    registry_repo: R,
}

impl<C, R> CompileUseCase<C, R>
where
    C: Compiler,
    R: RegistryRepository<Registry = CompiledRegistry>,
{
    pub fn new(compiler: C, registry_repo: R) -> Self {
        Self {
            compiler,
            registry_repo,
        }
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    /// Load, reconcile and persist
    pub fn execute(&self, modules: &ModuleSet, options: &CompileOptions) -> HscResult<CompileReport> {
        self.execute_with_events(modules, options, Arc::new(NoopEventSink))
    }

    /// Load, reconcile and persist, reporting progress to `event_sink`
    pub fn execute_with_events(
        &self,
        modules: &ModuleSet,
        options: &CompileOptions,
        event_sink: Arc<dyn ReconcileEventSink>,
    ) -> HscResult<CompileReport> {
        let _lock = self.registry_repo.lock()?;
        let prior = self.registry_repo.load()?;
        let report = self.reconcile(modules, prior, options, event_sink.as_ref())?;
        self.registry_repo.save(&report.registry)?;

        event_sink.on_event(ReconcileEvent::CompileFinished {
            changed_count: report.changed_count(),
            tool_version: options.tool_version.clone(),
        });

        Ok(report)
    }

    /// Reconcile `modules` against `prior` without touching persistence
    pub fn reconcile(
        &self,
        modules: &ModuleSet,
        prior: CompiledRegistry,
        options: &CompileOptions,
        event_sink: &dyn ReconcileEventSink,
    ) -> HscResult<CompileReport> {
        for module in modules.iter() {
            if !self.compiler.source_exists(module.source()) {
                return Err(HscError::SourceNotFound {
                    key: module.key().to_string(),
                    path: module.source().to_path_buf(),
                });
            }
        }

        event_sink.on_event(ReconcileEvent::CompileStarted {
            module_count: modules.len(),
        });

        let mut registry = prior;
        let mut changed = BTreeSet::new();
        let mut outcomes = Vec::with_capacity(modules.len());

        for (index, module) in modules.iter().enumerate() {
            let payload = self
                .compiler
                .compile(module.source())
                .map_err(|source| HscError::Compile {
                    key: module.key().to_string(),
                    source,
                })?;

            let outcome = detect_change(registry.get(module.key()), &payload, options.force);
            let digest = payload.digest();

            if outcome.is_changed() {
                registry.insert(module.key(), CompiledRecord::for_module(module, index, payload));
                changed.insert(module.key().to_string());
            } else if let Some(record) = registry.get_mut(module.key()) {
                record.refresh_metadata(module, index);
            }

            event_sink.on_event(ReconcileEvent::ModuleCompiled {
                index,
                key: module.key().to_string(),
                source: module.source().to_path_buf(),
                outcome,
                digest,
            });
            outcomes.push(ModuleCompileResult {
                key: module.key().to_string(),
                outcome,
            });
        }

        let pruned = registry.retain_keys(|key| modules.contains(key));
        if !pruned.is_empty() {
            event_sink.on_event(ReconcileEvent::RegistryPruned {
                keys: pruned.clone(),
            });
        }

        registry.set_tool_version(options.tool_version.clone());

        Ok(CompileReport {
            registry,
            changed,
            outcomes,
            pruned,
        })
    }
}
