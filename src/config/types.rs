//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Module, ModuleSet};
use crate::domain::value_objects::Tier;
use crate::error::HscResult;

use super::loader::{self, ConfigWarning};

/// Build configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory holding the module sources
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Tool version stamped into both registries
    #[serde(default = "default_version")]
    pub version: String,

    /// Explicit compiler executable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler: Option<PathBuf>,

    /// Directories searched for the compiler (from `AERGO_PATH`, `GOPATH`)
    #[serde(skip)]
    pub compiler_search_roots: Vec<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            version: default_version(),
            compiler: None,
            compiler_search_roots: Vec::new(),
        }
    }
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("./sc/")
}

fn default_version() -> String {
    format!("v{}", env!("CARGO_PKG_VERSION"))
}

/// Registry file locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_compiled_path")]
    pub compiled: PathBuf,

    #[serde(default = "default_deployed_path")]
    pub deployed: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            compiled: default_compiled_path(),
            deployed: default_deployed_path(),
        }
    }
}

fn default_compiled_path() -> PathBuf {
    PathBuf::from("./hsc.compiled.toml")
}

fn default_deployed_path() -> PathBuf {
    PathBuf::from("./hsc.deployed.toml")
}

/// Remote target configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// `host:port` of the target node
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Account that signs deployments and calls
    #[serde(default)]
    pub account: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keystore: Option<PathBuf>,

    /// Keystore password; passed to the target CLI as `--password`, so it is
    /// visible in the local process list while a command runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Refuse to deploy from an account with zero balance
    #[serde(default = "default_check_balance")]
    pub check_balance: bool,

    /// Target CLI executable
    #[serde(default = "default_cli")]
    pub cli: PathBuf,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Bounded wait for a submission to be confirmed
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            account: String::new(),
            keystore: None,
            password: None,
            check_balance: default_check_balance(),
            cli: default_cli(),
            poll_interval_ms: default_poll_interval_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TargetConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_endpoint() -> String {
    "localhost:7845".to_string()
}

fn default_check_balance() -> bool {
    true
}

fn default_cli() -> PathBuf {
    PathBuf::from("aergocli")
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

/// One `[[modules]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub key: String,
    pub tier: Tier,
    /// Source path; defaults to `<source_dir>/<key>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub target: TargetConfig,

    /// Explicit module set; the fixed HSC set when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<ModuleConfig>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> HscResult<Self> {
        Ok(loader::load_with_warnings(path)?.0)
    }

    /// Load configuration and collect unknown-key warnings
    pub fn load_with_warnings(path: &Path) -> HscResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Resolve the module set to reconcile
    pub fn module_set(&self) -> HscResult<ModuleSet> {
        if self.modules.is_empty() {
            return Ok(ModuleSet::hsc(&self.build.source_dir));
        }

        let modules = self
            .modules
            .iter()
            .map(|m| {
                let source = m
                    .source
                    .clone()
                    .unwrap_or_else(|| self.build.source_dir.join(&m.key));
                Module::new(m.key.clone(), m.tier, source)
            })
            .collect();
        ModuleSet::new(modules)
    }
}
