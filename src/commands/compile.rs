//! `hsc compile`

use anyhow::{bail, Result};
use hsc::config::Config;
use hsc::presentation::factory::{create_compile_use_case, create_event_sink};
use hsc::CompileOptions;

pub fn cmd_compile(
    mut config: Config,
    force: bool,
    version_tag: Option<String>,
    json: bool,
    verbose: u8,
) -> Result<()> {
    if let Some(version) = version_tag {
        config.build.version = version;
    }

    let modules = config.module_set()?;
    let use_case = create_compile_use_case(&config);
    if !use_case.compiler().check_available() {
        bail!(
            "compiler '{}' not found; set build.compiler or AERGO_PATH",
            use_case.compiler().program().display()
        );
    }

    let options = CompileOptions::new(&config.build.version).with_force(force);
    use_case.execute_with_events(&modules, &options, create_event_sink(json, verbose))?;
    Ok(())
}
