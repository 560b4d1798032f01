//! `hsc status`

use anyhow::Result;
use hsc::config::Config;
use hsc::domain::ports::RegistryRepository;
use hsc::presentation::factory::{create_compiled_repository, create_deployed_repository};
use hsc::presentation::StatusView;
use hsc::ui::detect_capabilities;

pub fn cmd_status(config: &Config, json: bool) -> Result<()> {
    let compiled = create_compiled_repository(config).load()?;
    let deployed = create_deployed_repository(config).load()?;
    let view = StatusView::new(&compiled, &deployed);

    if json {
        println!("{}", serde_json::to_string(&view.to_json())?);
    } else {
        print!("{}", view.render_text(detect_capabilities()));
    }
    Ok(())
}
