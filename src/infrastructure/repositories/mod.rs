//! Repository Implementations
//!
//! Concrete implementations of the registry repository port.

mod registry;

pub use registry::{
    TomlCompiledRegistryRepository, TomlDeployedRegistryRepository, DEFAULT_COMPILED_PATH,
    DEFAULT_DEPLOYED_PATH,
};
