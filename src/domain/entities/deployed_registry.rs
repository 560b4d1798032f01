//! Deployed Registry entity - last confirmed deployment per module
//!
//! A record only exists once its deployment reached a successful terminal
//! status, so every `DeployedRecord` carries an address.

use std::collections::BTreeMap;

use crate::domain::value_objects::Payload;

/// Deployment record for one module key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedRecord {
    /// Payload that was last successfully deployed
    payload: Payload,
    /// Address assigned by the target
    address: String,
}

impl DeployedRecord {
    pub fn new(payload: Payload, address: impl Into<String>) -> Self {
        Self {
            payload,
            address: address.into(),
        }
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Mapping `key -> DeployedRecord` plus tool version and root address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployedRegistry {
    tool_version: Option<String>,
    /// Address of the root module, the externally visible entry point
    root_address: Option<String>,
    modules: BTreeMap<String, DeployedRecord>,
}

impl DeployedRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool_version(&self) -> Option<&str> {
        self.tool_version.as_deref()
    }

    pub fn set_tool_version(&mut self, version: Option<String>) {
        self.tool_version = version;
    }

    pub fn root_address(&self) -> Option<&str> {
        self.root_address.as_deref()
    }

    pub fn set_root_address(&mut self, address: impl Into<String>) {
        self.root_address = Some(address.into());
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn get(&self, key: &str) -> Option<&DeployedRecord> {
        self.modules.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.modules.contains_key(key)
    }

    /// Record a confirmed deployment, replacing any previous record
    pub fn insert(&mut self, key: impl Into<String>, record: DeployedRecord) {
        self.modules.insert(key.into(), record);
    }

    pub fn remove(&mut self, key: &str) -> Option<DeployedRecord> {
        self.modules.remove(key)
    }

    /// Remove every module record whose key fails `keep`
    ///
    /// The scalar root address is never touched. Returns the removed keys.
    pub fn prune(&mut self, mut keep: impl FnMut(&str) -> bool) -> Vec<String> {
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

    pub fn records(&self) -> impl Iterator<Item = (&str, &DeployedRecord)> {
        self.modules.iter().map(|(k, v)| (k.as_str(), v))
    }
}
