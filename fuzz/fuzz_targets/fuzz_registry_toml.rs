#![no_main]

use libfuzzer_sys::fuzz_target;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Mirror of the compiled registry document (private in main crate)
#[derive(Deserialize)]
#[allow(dead_code)]
struct CompiledDocument {
    #[serde(default)]
    tool_version: Option<String>,
    #[serde(default)]
    modules: BTreeMap<String, CompiledEntry>,
}

#[derive(Deserialize)]
#[allow(dead_code)]
struct CompiledEntry {
    tier: hsc::Tier,
    order: usize,
    source: PathBuf,
    payload: hsc::Payload,
}

/// Mirror of the deployed registry document
#[derive(Deserialize)]
#[allow(dead_code)]
struct DeployedDocument {
    #[serde(default)]
    tool_version: Option<String>,
    #[serde(default)]
    root_address: Option<String>,
    #[serde(default)]
    modules: BTreeMap<String, DeployedEntry>,
}

#[derive(Deserialize)]
#[allow(dead_code)]
struct DeployedEntry {
    payload: hsc::Payload,
    address: String,
}

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Registry TOML parsing - this should never panic
        let _ = toml::from_str::<CompiledDocument>(content);
        let _ = toml::from_str::<DeployedDocument>(content);
    }
});
