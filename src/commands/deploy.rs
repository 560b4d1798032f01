//! `hsc deploy`

use anyhow::Result;
use hsc::config::Config;
use hsc::presentation::factory::{create_deploy_use_case, create_event_sink};
use hsc::DeployOptions;

/// Target overrides given on the command line
#[derive(Debug, Default)]
pub struct TargetOverrides {
    pub target: Option<String>,
    pub timeout: Option<u64>,
}

impl TargetOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(target) = &self.target {
            config.target.endpoint = target.clone();
        }
        if let Some(secs) = self.timeout {
            config.target.timeout_secs = secs;
        }
    }
}

pub fn cmd_deploy(
    mut config: Config,
    overrides: TargetOverrides,
    force: bool,
    dry_run: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    overrides.apply(&mut config);

    let options = deploy_options(&config, force, dry_run);
    create_deploy_use_case(&config).execute_with_events(&options, create_event_sink(json, verbose))?;
    Ok(())
}

fn deploy_options(config: &Config, force: bool, dry_run: bool) -> DeployOptions {
    DeployOptions::new()
        .with_force(force)
        .with_dry_run(dry_run)
        .with_skip_balance_check(!config.target.check_balance)
}
