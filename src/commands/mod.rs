//! Command runners, one per subcommand

pub mod call;
pub mod compile;
pub mod deploy;
pub mod project_root;
pub mod status;

use std::path::Path;

use anyhow::{Context, Result};
use hsc::config::{self, Config, ConfigWarning};
use hsc::ui::{detect_capabilities, Icon};

/// Resolve the configuration for this invocation and report unknown keys
pub fn load_config(explicit: Option<&Path>, project_root: &Path, json: bool) -> Result<Config> {
    let (config, warnings) = config::load_layered(explicit, Some(project_root))
        .context("failed to load configuration")?;
    if !json {
        print_config_warnings(&warnings);
    }
    Ok(config)
}

pub fn print_config_warnings(warnings: &[ConfigWarning]) {
    let caps = detect_capabilities();
    let icon = Icon::Warning.colored(caps.supports_color, caps.supports_unicode);
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!("{} Unknown config key '{}' in {}:{}", icon, w.key, w.file.display(), line);
        } else {
            eprintln!("{} Unknown config key '{}' in {}", icon, w.key, w.file.display());
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?", suggestion);
        }
    }
}
