//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (--json, --verbose, --config) are inherited by all subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// hsc - compile and deploy reconciler for Horde Smart Contract modules
#[derive(Parser, Debug)]
#[command(name = "hsc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./hsc.toml, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile every module and update the compiled registry
    Compile {
        /// Replace every compiled record even if unchanged
        #[arg(short, long)]
        force: bool,

        /// Tool version to stamp into the registry
        #[arg(long, value_name = "V")]
        version_tag: Option<String>,
    },

    /// Deploy changed modules, cascading to every later module
    Deploy {
        /// Redeploy every module
        #[arg(short, long)]
        force: bool,

        /// Show what would be deployed without touching the target
        #[arg(long)]
        dry_run: bool,

        /// Target node (HOST:PORT)
        #[arg(long, value_name = "HOST:PORT")]
        target: Option<String>,

        /// Seconds to wait for each confirmation
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// Show compiled and deployed registries side by side
    Status,

    /// Call a function on the deployed root module
    Call {
        /// Function name
        function: String,

        /// Arguments, passed as strings
        args: Vec<String>,

        /// Target node (HOST:PORT)
        #[arg(long, value_name = "HOST:PORT")]
        target: Option<String>,
    },

    /// Query a function on the deployed root module
    Query {
        /// Function name
        function: String,

        /// Arguments, passed as strings
        args: Vec<String>,

        /// Target node (HOST:PORT)
        #[arg(long, value_name = "HOST:PORT")]
        target: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["hsc"]).is_err());
    }

    #[test]
    fn test_cli_parse_compile() {
        let cli = Cli::try_parse_from(["hsc", "compile"]).unwrap();
        if let Commands::Compile { force, version_tag } = cli.command {
            assert!(!force);
            assert_eq!(version_tag, None);
        } else {
            panic!("Expected Compile command");
        }
    }

    #[test]
    fn test_cli_parse_compile_flags() {
        let cli =
            Cli::try_parse_from(["hsc", "compile", "--force", "--version-tag", "v2"]).unwrap();
        if let Commands::Compile { force, version_tag } = cli.command {
            assert!(force);
            assert_eq!(version_tag.as_deref(), Some("v2"));
        } else {
            panic!("Expected Compile command");
        }
    }

    #[test]
    fn test_cli_parse_deploy() {
        let cli = Cli::try_parse_from([
            "hsc",
            "deploy",
            "--dry-run",
            "--target",
            "testnet:7845",
            "--timeout",
            "5",
        ])
        .unwrap();
        if let Commands::Deploy {
            force,
            dry_run,
            target,
            timeout,
        } = cli.command
        {
            assert!(!force);
            assert!(dry_run);
            assert_eq!(target.as_deref(), Some("testnet:7845"));
            assert_eq!(timeout, Some(5));
        } else {
            panic!("Expected Deploy command");
        }
    }

    #[test]
    fn test_cli_parse_call_with_args() {
        let cli = Cli::try_parse_from(["hsc", "call", "setVersion", "v1"]).unwrap();
        if let Commands::Call { function, args, .. } = cli.command {
            assert_eq!(function, "setVersion");
            assert_eq!(args, vec!["v1".to_string()]);
        } else {
            panic!("Expected Call command");
        }
    }

    #[test]
    fn test_cli_parse_query() {
        let cli = Cli::try_parse_from(["hsc", "query", "getVersion"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Query { ref function, ref args, .. } if function == "getVersion" && args.is_empty()
        ));
    }

    #[test]
    fn test_cli_json_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["hsc", "status", "--json"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["hsc", "-vv", "deploy"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_config_flag() {
        let cli = Cli::try_parse_from(["hsc", "--config", "ci.toml", "compile"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ci.toml")));
    }
}
