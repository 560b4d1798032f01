//! Configuration module for hsc
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (AERGO_*, HSC_VERSION)
//! 3. Project config (./hsc.toml) or `--config PATH`
//! 4. User config (~/.config/hsc/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    candidate_paths, load_layered, ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use types::{BuildConfig, Config, ModuleConfig, RegistryConfig, TargetConfig};
