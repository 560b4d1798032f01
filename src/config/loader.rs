//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HscError, HscResult};

use super::types::Config;

/// Project config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "hsc.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> HscResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

fn parse_with_warnings(content: &str, path: &Path) -> HscResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| HscError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Config file locations in priority order
pub fn candidate_paths(project_root: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(root) = project_root {
        paths.push(root.join(PROJECT_CONFIG_FILE));
    }
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("hsc").join("config.toml"));
    }
    paths
}

/// Load the first existing config file, with env overrides applied
///
/// An explicit path must exist. Otherwise the project config, then the user
/// config, then the defaults are used.
pub fn load_layered(
    explicit: Option<&Path>,
    project_root: Option<&Path>,
) -> HscResult<(Config, Vec<ConfigWarning>)> {
    let found = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => candidate_paths(project_root)
            .into_iter()
            .find(|p| p.is_file()),
    };

    let (config, warnings) = match found {
        Some(path) => load_with_warnings(&path)?,
        None => (Config::default(), Vec::new()),
    };
    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (AERGO_*, HSC_*)
fn with_env_overrides(config: Config) -> Config {
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

fn apply_env_overrides(mut config: Config, get_env: impl Fn(&str) -> Option<String>) -> Config {
    let non_empty = |key: &str| get_env(key).filter(|v| !v.trim().is_empty());

    // AERGO_TARGET
    if let Some(endpoint) = non_empty("AERGO_TARGET") {
        config.target.endpoint = endpoint.trim().to_string();
    }

    // AERGO_WAITING_TIME (seconds)
    if let Some(secs) = non_empty("AERGO_WAITING_TIME").and_then(|v| v.trim().parse().ok()) {
        config.target.timeout_secs = secs;
    }

    // AERGO_ACCOUNT / AERGO_PASSWORD
    if let Some(account) = non_empty("AERGO_ACCOUNT") {
        config.target.account = account;
    }
    if let Some(password) = get_env("AERGO_PASSWORD") {
        config.target.password = Some(password);
    }

    // HSC_VERSION
    if let Some(version) = non_empty("HSC_VERSION") {
        config.build.version = version;
    }

    // AERGO_PATH, then GOPATH
    let mut roots = Vec::new();
    for key in ["AERGO_PATH", "GOPATH"] {
        if let Some(value) = non_empty(key) {
            roots.extend(std::env::split_paths(&value));
        }
    }
    config.build.compiler_search_roots = roots;

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "build",
        "source_dir",
        "version",
        "compiler",
        "registry",
        "compiled",
        "deployed",
        "target",
        "endpoint",
        "account",
        "keystore",
        "password",
        "check_balance",
        "cli",
        "poll_interval_ms",
        "timeout_secs",
        "modules",
        "key",
        "tier",
        "source",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

#[cfg(test)]
pub(super) fn apply_env_for_test(
    config: Config,
    env: &std::collections::HashMap<&str, &str>,
) -> Config {
    apply_env_overrides(config, |k| env.get(k).map(|v| v.to_string()))
}

#[cfg(test)]
pub(super) fn parse_for_test(content: &str) -> HscResult<(Config, Vec<ConfigWarning>)> {
    parse_with_warnings(content, Path::new("hsc.toml"))
}

#[cfg(test)]
pub(super) fn suggest_for_test(unknown: &str) -> Option<String> {
    suggest_key(unknown)
}
