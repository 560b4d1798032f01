//! `hsc call` / `hsc query` against the deployed root module

use anyhow::{anyhow, Context, Result};
use hsc::config::Config;
use hsc::domain::ports::{RegistryRepository, TargetClient};
use hsc::presentation::factory::{create_deployed_repository, create_target_client};

use super::deploy::TargetOverrides;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    Call,
    Query,
}

impl Invocation {
    fn as_str(&self) -> &'static str {
        match self {
            Invocation::Call => "call",
            Invocation::Query => "query",
        }
    }
}

pub fn cmd_invoke(
    mut config: Config,
    invocation: Invocation,
    function: &str,
    args: &[String],
    target: Option<String>,
    json: bool,
) -> Result<()> {
    TargetOverrides {
        target,
        timeout: None,
    }
    .apply(&mut config);

    let repo = create_deployed_repository(&config);
    let address = repo
        .load()?
        .root_address()
        .map(str::to_string)
        .ok_or_else(|| {
            anyhow!(
                "no root address in {} - run `hsc deploy` first",
                repo.path().display()
            )
        })?;

    let client = create_target_client(&config);
    let result = match invocation {
        Invocation::Call => client.call(&address, function, args),
        Invocation::Query => client.query(&address, function, args),
    }
    .with_context(|| format!("{} {} on {} failed", invocation.as_str(), function, address))?;

    if json {
        let output = serde_json::json!({
            "event": invocation.as_str(),
            "address": address,
            "function": function,
            "result": result,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", result);
    }
    Ok(())
}
