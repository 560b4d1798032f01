use std::path::{Path, PathBuf};

use hsc::config::PROJECT_CONFIG_FILE;
use hsc::infrastructure::repositories::{DEFAULT_COMPILED_PATH, DEFAULT_DEPLOYED_PATH};

/// Discover the project root directory from an invocation directory.
///
/// Heuristics (first match wins, walking upward from `start`):
/// - `hsc.toml` (project configuration)
/// - `hsc.compiled.toml` / `hsc.deployed.toml` (existing registries)
///
/// Falls back to `start` when no markers are found.
pub(crate) fn discover_project_root(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        if dir.join(PROJECT_CONFIG_FILE).is_file() {
            return dir.to_path_buf();
        }
        if dir.join(DEFAULT_COMPILED_PATH).is_file() || dir.join(DEFAULT_DEPLOYED_PATH).is_file() {
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}
