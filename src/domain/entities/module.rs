//! Module entity - a named compilable and deployable unit
//!
//! A `ModuleSet` is the fixed, validated list of modules for one project,
//! kept in deployment order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::Tier;
use crate::error::{HscError, HscResult};

/// Keys of the Horde Smart Contract modules, in declared order.
pub const HSC_META: &str = "hsc_meta.lua";
pub const HSC_DB: &str = "hsc_db.lua";
pub const HSC_CMD: &str = "hsc_cmd.lua";
pub const HSC_RESULT: &str = "hsc_result.lua";
pub const HSC_CONFIG: &str = "hsc_config.lua";
pub const HSC_POND: &str = "hsc_pond.lua";

/// A compilable unit of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    key: String,
    tier: Tier,
    source: PathBuf,
}

impl Module {
    pub fn new(key: impl Into<String>, tier: Tier, source: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            tier,
            source: source.into(),
        }
    }

    /// Stable identifier, never reused for a different logical unit
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Location handed to the compiler
    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// Validated, ordered set of modules
///
/// Order is root, then dependent-primary, then regular modules in the
/// order they were declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSet {
    modules: Vec<Module>,
}

impl ModuleSet {
    /// Validate and order a list of modules
    pub fn new(modules: Vec<Module>) -> HscResult<Self> {
        if modules.is_empty() {
            return Err(HscError::InvalidModuleSet("no modules declared".to_string()));
        }

        let mut seen = HashSet::new();
        for module in &modules {
            if !seen.insert(module.key.as_str()) {
                return Err(HscError::InvalidModuleSet(format!(
                    "duplicate module key '{}'",
                    module.key
                )));
            }
        }

        let roots = modules.iter().filter(|m| m.tier == Tier::Root).count();
        if roots != 1 {
            return Err(HscError::InvalidModuleSet(format!(
                "expected exactly one root module, found {}",
                roots
            )));
        }

        let primaries = modules
            .iter()
            .filter(|m| m.tier == Tier::DependentPrimary)
            .count();
        if primaries > 1 {
            return Err(HscError::InvalidModuleSet(format!(
                "expected at most one dependent-primary module, found {}",
                primaries
            )));
        }

        let mut modules = modules;
        // stable: regular modules keep their declared order
        modules.sort_by_key(|m| m.tier);

        Ok(Self { modules })
    }

    /// The Horde Smart Contract module set rooted at `source_dir`
    pub fn hsc(source_dir: &Path) -> Self {
        let module = |key: &str, tier| Module::new(key, tier, source_dir.join(key));
        Self {
            modules: vec![
                module(HSC_META, Tier::Root),
                module(HSC_DB, Tier::DependentPrimary),
                module(HSC_CMD, Tier::Regular),
                module(HSC_RESULT, Tier::Regular),
                module(HSC_CONFIG, Tier::Regular),
                module(HSC_POND, Tier::Regular),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.modules.iter().any(|m| m.key == key)
    }

    pub fn root(&self) -> &Module {
        // validated in `new`
        &self.modules[0]
    }
}
