//! TOML Registry Repositories
//!
//! Persists the Compiled Registry (`hsc.compiled.toml`) and the Deployed
//! Registry (`hsc.deployed.toml`). Saves replace the file atomically; a run
//! serializes against other processes through an exclusive lock on
//! `<name>.lock`, taken before load and released after save.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::domain::entities::{CompiledRecord, CompiledRegistry, DeployedRecord, DeployedRegistry};
use crate::domain::ports::{RegistryError, RegistryLock, RegistryRepository, RegistryResult};
use crate::domain::value_objects::{Payload, Tier};
use crate::infrastructure::fs::atomic_write;

pub const DEFAULT_COMPILED_PATH: &str = "hsc.compiled.toml";
pub const DEFAULT_DEPLOYED_PATH: &str = "hsc.deployed.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlCompiledRecord {
    tier: Tier,
    order: usize,
    source: PathBuf,
    payload: Payload,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TomlCompiledRegistry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_version: Option<String>,
    #[serde(default)]
    modules: BTreeMap<String, TomlCompiledRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlDeployedRecord {
    payload: Payload,
    address: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TomlDeployedRegistry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    root_address: Option<String>,
    #[serde(default)]
    modules: BTreeMap<String, TomlDeployedRecord>,
}

/// One registry file on disk
#[derive(Debug, Clone)]
struct RegistryFile {
    path: PathBuf,
}

impl RegistryFile {
    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn load<T: DeserializeOwned + Default>(&self) -> RegistryResult<T> {
        if !self.path.exists() {
            return Ok(T::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| RegistryError::AccessError {
            message: format!("{}: {}", self.path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| RegistryError::Corrupted {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn save<T: Serialize>(&self, document: &T) -> RegistryResult<()> {
        let content =
            toml::to_string_pretty(document).map_err(|e| RegistryError::SerializationError {
                message: e.to_string(),
            })?;

        atomic_write(&self.path, &content).map_err(|e| RegistryError::AccessError {
            message: format!("{}: {}", self.path.display(), e),
        })
    }

    fn lock(&self) -> RegistryResult<RegistryLock> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| RegistryError::AccessError {
                message: e.to_string(),
            })?;
        }

        let lock_file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| RegistryError::AccessError {
                message: format!("{}: {}", lock_path.display(), e),
            })?;

        match lock_file.try_lock_exclusive() {
            Ok(()) => Ok(RegistryLock::holding(HeldLock(lock_file))),
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                Err(RegistryError::Locked {
                    path: self.path.clone(),
                })
            }
            Err(e) => Err(RegistryError::AccessError {
                message: format!("{}: {}", lock_path.display(), e),
            }),
        }
    }
}

/// Lock file held for the duration of a run
struct HeldLock(fs::File);

impl Drop for HeldLock {
    fn drop(&mut self) {
        let _ = self.0.unlock();
    }
}

/// Compiled Registry stored as TOML
pub struct TomlCompiledRegistryRepository {
    file: RegistryFile,
}

impl TomlCompiledRegistryRepository {
    pub fn new() -> Self {
        Self::with_path(PathBuf::from(DEFAULT_COMPILED_PATH))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            file: RegistryFile { path: path.into() },
        }
    }

    pub fn path(&self) -> &Path {
        &self.file.path
    }
}

impl Default for TomlCompiledRegistryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryRepository for TomlCompiledRegistryRepository {
    type Registry = CompiledRegistry;

    fn load(&self) -> RegistryResult<CompiledRegistry> {
        let document: TomlCompiledRegistry = self.file.load()?;

        let mut registry = CompiledRegistry::new();
        if let Some(version) = document.tool_version {
            registry.set_tool_version(version);
        }
        for (key, record) in document.modules {
            registry.insert(
                key,
                CompiledRecord::new(record.payload, record.source, record.tier, record.order),
            );
        }
        Ok(registry)
    }

    fn save(&self, registry: &CompiledRegistry) -> RegistryResult<()> {
        let document = TomlCompiledRegistry {
            tool_version: registry.tool_version().map(str::to_string),
            modules: registry
                .records()
                .map(|(key, record)| {
                    (
                        key.to_string(),
                        TomlCompiledRecord {
                            tier: record.tier(),
                            order: record.order(),
                            source: record.source().to_path_buf(),
                            payload: record.payload().clone(),
                        },
                    )
                })
                .collect(),
        };
        self.file.save(&document)
    }

    fn lock(&self) -> RegistryResult<RegistryLock> {
        self.file.lock()
    }
}

/// Deployed Registry stored as TOML
pub struct TomlDeployedRegistryRepository {
    file: RegistryFile,
}

impl TomlDeployedRegistryRepository {
    pub fn new() -> Self {
        Self::with_path(PathBuf::from(DEFAULT_DEPLOYED_PATH))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            file: RegistryFile { path: path.into() },
        }
    }

    pub fn path(&self) -> &Path {
        &self.file.path
    }
}

impl Default for TomlDeployedRegistryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryRepository for TomlDeployedRegistryRepository {
    type Registry = DeployedRegistry;

    fn load(&self) -> RegistryResult<DeployedRegistry> {
        let document: TomlDeployedRegistry = self.file.load()?;

        let mut registry = DeployedRegistry::new();
        registry.set_tool_version(document.tool_version);
        if let Some(address) = document.root_address {
            registry.set_root_address(address);
        }
        for (key, record) in document.modules {
            registry.insert(key, DeployedRecord::new(record.payload, record.address));
        }
        Ok(registry)
    }

    fn save(&self, registry: &DeployedRegistry) -> RegistryResult<()> {
        let document = TomlDeployedRegistry {
            tool_version: registry.tool_version().map(str::to_string),
            root_address: registry.root_address().map(str::to_string),
            modules: registry
                .records()
                .map(|(key, record)| {
                    (
                        key.to_string(),
                        TomlDeployedRecord {
                            payload: record.payload().clone(),
                            address: record.address().to_string(),
                        },
                    )
                })
                .collect(),
        };
        self.file.save(&document)
    }

    fn lock(&self) -> RegistryResult<RegistryLock> {
        self.file.lock()
    }
}
