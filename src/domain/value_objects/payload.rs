//! Payload value object
//!
//! The opaque, deterministic output of the external compiler. Two payloads
//! are equal iff their bytes are equal; the digest is only for display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compiled payload of a module
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(String);

impl Payload {
    /// Prefix used by [`Payload::digest`]
    pub const DIGEST_PREFIX: &'static str = "sha256:";

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// SHA-256 of the payload bytes, prefixed with `sha256:`
    pub fn digest(&self) -> String {
        use sha2::{Digest, Sha256};
        let hash = Sha256::digest(self.0.as_bytes());
        format!("{}{:x}", Self::DIGEST_PREFIX, hash)
    }

    /// First 12 hex chars of the digest, for compact reports
    pub fn short_digest(&self) -> String {
        let digest = self.digest();
        let hex = &digest[Self::DIGEST_PREFIX.len()..];
        hex[..12].to_string()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Payload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
