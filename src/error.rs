//! Error types for hsc
//!
//! Uses `thiserror` for library errors. Each port has its own error enum;
//! they all fold into `HscError` so a run fails with a single terminal error.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{CompileError, RegistryError, TargetError};

/// Result type alias for hsc operations
pub type HscResult<T> = Result<T, HscError>;

/// Main error type for hsc operations
#[derive(Error, Debug)]
pub enum HscError {
    /// Source file of a module does not exist
    #[error("cannot find the source file for '{key}': {path}")]
    SourceNotFound { key: String, path: PathBuf },

    /// Module set failed validation
    #[error("invalid module set: {0}")]
    InvalidModuleSet(String),

    /// Compiled registry has no root module to deploy
    #[error("compiled registry has no root module - run `hsc compile` first")]
    MissingRoot,

    /// Compiled registry was never stamped by a compile run
    #[error("compiled registry has no tool version - run `hsc compile` first")]
    MissingToolVersion,

    /// Registry could not be read or written
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// External compiler failed for a module
    #[error("failed to compile '{key}': {source}")]
    Compile {
        key: String,
        #[source]
        source: CompileError,
    },

    /// Deployment of a module did not reach a successful terminal status
    #[error("failed to deploy '{key}': {source}")]
    Deploy {
        key: String,
        #[source]
        source: TargetError,
    },

    /// Signing account state could not be read before deploying
    #[error("failed to read the state of the deploying account: {0}")]
    AccountState(#[source] TargetError),

    /// Signing account has nothing to pay for submissions
    #[error(
        "account {address} has no balance to deploy with\n  → Fix: request tokens for {address} (e.g. https://faucet.aergoscan.io/) and deploy again"
    )]
    InsufficientBalance { address: String },

    /// Final version synchronization call failed
    #[error("failed to synchronize version on {address}: {source}")]
    VersionSync {
        address: String,
        #[source]
        source: TargetError,
    },

    /// Invalid configuration file
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
