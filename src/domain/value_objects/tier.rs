//! Tier value object - deployment ordering class of a module
//!
//! - `Root`: deployed first, no constructor arguments, exactly one per set
//! - `DependentPrimary`: deployed second with the root address as argument
//! - `Regular`: everything else, in declared order, with the root address

use serde::{Deserialize, Serialize};

/// Ordering class of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Single entry point; its address is threaded to every other module
    Root,
    /// Load-bearing module deployed right after the root (e.g. the data layer)
    DependentPrimary,
    /// Any remaining module
    Regular,
}

impl Tier {
    /// Returns true if this is the root tier
    pub fn is_root(&self) -> bool {
        matches!(self, Tier::Root)
    }

    /// Whether modules of this tier take the root address as constructor argument
    pub fn takes_root_address(&self) -> bool {
        !self.is_root()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Root => "root",
            Tier::DependentPrimary => "dependent-primary",
            Tier::Regular => "regular",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "root" => Ok(Tier::Root),
            "dependent-primary" | "primary" => Ok(Tier::DependentPrimary),
            "regular" => Ok(Tier::Regular),
            other => Err(format!(
                "unknown tier '{}' (expected root, dependent-primary or regular)",
                other
            )),
        }
    }
}
