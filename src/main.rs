//! hsc CLI - compile and deploy reconciler for Horde Smart Contract modules
//!
//! Usage: hsc <COMMAND>
//!
//! Commands:
//!   compile  Compile every module and update the compiled registry
//!   deploy   Deploy changed modules, cascading to every later module
//!   status   Show compiled and deployed registries side by side
//!   call     Call a function on the deployed root module
//!   query    Query a function on the deployed root module

use anyhow::{Context, Result};
use clap::Parser;
use hsc::presentation::{Cli, Commands};
use hsc::ui::{detect_capabilities, Icon};

mod commands;

use commands::call::{cmd_invoke, Invocation};
use commands::compile::cmd_compile;
use commands::deploy::{cmd_deploy, TargetOverrides};
use commands::project_root::discover_project_root;
use commands::status::cmd_status;

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli) {
        if json {
            let output = serde_json::json!({
                "event": "error",
                "message": format!("{:#}", err),
            });
            println!("{}", output);
        } else {
            let caps = detect_capabilities();
            eprintln!(
                "{} Error: {:#}",
                Icon::Error.colored(caps.supports_color, caps.supports_unicode),
                err
            );
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let explicit_config = cli.config.as_ref().map(|path| cwd.join(path));
    let project_root = discover_project_root(&cwd);
    if project_root != cwd {
        // registry and source paths in the config are relative to the project root
        std::env::set_current_dir(&project_root)
            .with_context(|| format!("cannot enter {}", project_root.display()))?;
    }

    let config = commands::load_config(explicit_config.as_deref(), &project_root, cli.json)?;

    match cli.command {
        Commands::Compile { force, version_tag } => {
            cmd_compile(config, force, version_tag, cli.json, cli.verbose)
        }
        Commands::Deploy {
            force,
            dry_run,
            target,
            timeout,
        } => cmd_deploy(
            config,
            TargetOverrides { target, timeout },
            force,
            dry_run,
            cli.json,
            cli.verbose,
        ),
        Commands::Status => cmd_status(&config, cli.json),
        Commands::Call {
            function,
            args,
            target,
        } => cmd_invoke(config, Invocation::Call, &function, &args, target, cli.json),
        Commands::Query {
            function,
            args,
            target,
        } => cmd_invoke(config, Invocation::Query, &function, &args, target, cli.json),
    }
}
