//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Atomic file writes
//! - `repositories/` - TOML registry repositories
//! - `compiler/` - `aergoluac` compiler adapter
//! - `target/` - `aergocli` target client and confirmation polling
//! - `events/` - Console and NDJSON event sinks

pub mod compiler;
pub mod events;
pub mod fs;
pub mod repositories;
pub mod target;

// Re-export for convenience
pub use compiler::AergoLuaCompiler;
pub use events::{ConsoleEventSink, JsonEventSink};
pub use repositories::{TomlCompiledRegistryRepository, TomlDeployedRegistryRepository};
pub use target::{AergoCliClient, Poller, Signer};
