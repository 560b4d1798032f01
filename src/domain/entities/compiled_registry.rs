//! Compiled Registry entity - last known compiled payload per module
//!
//! Pure data structure; persistence is handled by a `RegistryRepository`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::entities::Module;
use crate::domain::value_objects::{Payload, Tier};

/// Compile-time record for one module key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRecord {
    /// Output of the most recent successful compilation
    payload: Payload,
    /// Last-seen source location
    source: PathBuf,
    /// Ordering class, used by the deploy run
    tier: Tier,
    /// Declared position within the module set
    order: usize,
}

impl CompiledRecord {
    pub fn new(payload: Payload, source: impl Into<PathBuf>, tier: Tier, order: usize) -> Self {
        Self {
            payload,
            source: source.into(),
            tier,
            order,
        }
    }

    /// Build a record for `module` at position `order`
    pub fn for_module(module: &Module, order: usize, payload: Payload) -> Self {
        Self::new(payload, module.source(), module.tier(), order)
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Refresh source, tier and order without touching the payload
    pub fn refresh_metadata(&mut self, module: &Module, order: usize) {
        self.source = module.source().to_path_buf();
        self.tier = module.tier();
        self.order = order;
    }
}

/// Mapping `key -> CompiledRecord` plus the tool version of the last compile run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledRegistry {
    tool_version: Option<String>,
    modules: BTreeMap<String, CompiledRecord>,
}

impl CompiledRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool_version(&self) -> Option<&str> {
        self.tool_version.as_deref()
    }

    pub fn set_tool_version(&mut self, version: impl Into<String>) {
        self.tool_version = Some(version.into());
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn get(&self, key: &str) -> Option<&CompiledRecord> {
        self.modules.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut CompiledRecord> {
        self.modules.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.modules.contains_key(key)
    }

    /// Insert or fully replace a record
    pub fn insert(&mut self, key: impl Into<String>, record: CompiledRecord) {
        self.modules.insert(key.into(), record);
    }

    pub fn remove(&mut self, key: &str) -> Option<CompiledRecord> {
        self.modules.remove(key)
    }

    /// Drop every record whose key fails `keep`; returns the removed keys
    pub fn retain_keys(&mut self, mut keep: impl FnMut(&str) -> bool) -> Vec<String> {
        let removed: Vec<String> = self
            .modules
            .keys()
            .filter(|k| !keep(k))
            .cloned()
            .collect();
        for key in &removed {
            self.modules.remove(key);
        }
        removed
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(|s| s.as_str())
    }

    /// Records in key order
    pub fn records(&self) -> impl Iterator<Item = (&str, &CompiledRecord)> {
        self.modules.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Records in deployment order: tier, then declared order, then key
    pub fn deploy_order(&self) -> Vec<(&str, &CompiledRecord)> {
        let mut ordered: Vec<_> = self.records().collect();
        ordered.sort_by(|(ka, a), (kb, b)| {
            (a.tier, a.order, *ka).cmp(&(b.tier, b.order, *kb))
        });
        ordered
    }

    /// The root record, if any
    pub fn root(&self) -> Option<(&str, &CompiledRecord)> {
        self.records().find(|(_, r)| r.tier.is_root())
    }
}
