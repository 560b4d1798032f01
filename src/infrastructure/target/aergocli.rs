//! `aergocli` Target Client
//!
//! Drives the target through the `aergocli` executable:
//! - `contract deploy` / `contract call` submit a transaction and print its hash
//! - `receipt get <hash>` is polled until the transaction is mined
//! - `contract query` is read-only and answers immediately
//! - `getstate --address` reads the signing account's nonce and balance
//!
//! Constructor and call arguments are passed as a JSON array.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::Deserialize;

use super::poll::Poller;
use crate::domain::ports::{AccountState, TargetClient, TargetError};
use crate::domain::value_objects::Payload;

/// Terminal status of a successful deployment
pub const STATUS_CREATED: &str = "CREATED";
/// Terminal status of a successful call
pub const STATUS_SUCCESS: &str = "SUCCESS";

/// Runs one `aergocli` invocation and returns its stdout
pub trait CommandRunner {
    fn run(&self, args: &[String]) -> Result<String, TargetError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, args: &[String]) -> Result<String, TargetError> {
        (**self).run(args)
    }
}

/// Spawns the real executable
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: PathBuf,
}

impl ProcessRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, args: &[String]) -> Result<String, TargetError> {
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                TargetError::Transport(format!("{}: {}", self.program.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(TargetError::Transport(if stderr.is_empty() {
                format!("{} exited with {:?}", self.program.display(), output.status.code())
            } else {
                stderr
            }));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Account used to sign submissions
///
/// `aergocli` only takes the keystore password as `--password`, so it is
/// visible in the process list of the machine running hsc.
#[derive(Clone, Default)]
pub struct Signer {
    pub account: String,
    pub keystore: Option<PathBuf>,
    pub password: Option<String>,
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("account", &self.account)
            .field("keystore", &self.keystore)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct StateResponse {
    #[serde(default)]
    account: Option<String>,
    #[serde(default)]
    nonce: u64,
    balance: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    hash: String,
}

#[derive(Debug, Deserialize)]
struct Receipt {
    #[serde(rename = "contractAddress", default)]
    contract_address: String,
    status: String,
    #[serde(default)]
    ret: serde_json::Value,
}

impl Receipt {
    fn detail(&self) -> String {
        match &self.ret {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Target client backed by `aergocli`
pub struct AergoCliClient<R: CommandRunner = ProcessRunner> {
    runner: R,
    endpoint: String,
    signer: Signer,
    poller: Poller,
}

impl AergoCliClient<ProcessRunner> {
    pub fn new(program: impl Into<PathBuf>, endpoint: impl Into<String>, signer: Signer) -> Self {
        Self::with_runner(ProcessRunner::new(program), endpoint, signer)
    }
}

impl<R: CommandRunner> AergoCliClient<R> {
    pub fn with_runner(runner: R, endpoint: impl Into<String>, signer: Signer) -> Self {
        Self {
            runner,
            endpoint: endpoint.into(),
            signer,
            poller: Poller::default(),
        }
    }

    #[must_use]
    pub fn with_poller(mut self, poller: Poller) -> Self {
        self.poller = poller;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn base_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        match self.endpoint.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() => {
                args.extend(["--host".to_string(), host.to_string()]);
                args.extend(["--port".to_string(), port.to_string()]);
            }
            _ => args.extend(["--host".to_string(), self.endpoint.clone()]),
        }
        args
    }

    fn signer_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(keystore) = &self.signer.keystore {
            args.extend(["--keystore".to_string(), keystore.display().to_string()]);
        }
        if let Some(password) = &self.signer.password {
            args.extend(["--password".to_string(), password.clone()]);
        }
        args
    }

    fn submit(&self, args: Vec<String>) -> Result<String, TargetError> {
        let stdout = self.runner.run(&args)?;
        let response: SubmitResponse = serde_json::from_str(&stdout)
            .map_err(|e| TargetError::Malformed(format!("submit response: {}", e)))?;
        Ok(response.hash)
    }

    fn wait_receipt(&self, tx: &str) -> Result<Receipt, TargetError> {
        let mut args = self.base_args();
        args.extend(["receipt".to_string(), "get".to_string(), tx.to_string()]);

        self.poller.wait(tx, || match self.runner.run(&args) {
            // not mined yet
            Err(TargetError::Transport(_)) => Ok(None),
            Err(e) => Err(e),
            Ok(stdout) => serde_json::from_str::<Receipt>(&stdout)
                .map(Some)
                .map_err(|e| TargetError::Malformed(format!("receipt {}: {}", tx, e))),
        })
    }
}

fn encode_args(args: &[String]) -> Result<String, TargetError> {
    serde_json::to_string(args).map_err(|e| TargetError::Malformed(e.to_string()))
}

impl<R: CommandRunner> TargetClient for AergoCliClient<R> {
    fn account_state(&self) -> Result<AccountState, TargetError> {
        let mut cli_args = self.base_args();
        cli_args.extend([
            "getstate".to_string(),
            "--address".to_string(),
            self.signer.account.clone(),
        ]);

        let stdout = self.runner.run(&cli_args)?;
        let state: StateResponse = serde_json::from_str(&stdout)
            .map_err(|e| TargetError::Malformed(format!("account state: {}", e)))?;
        let balance = match state.balance {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => {
                return Err(TargetError::Malformed(format!(
                    "account balance: {}",
                    other
                )))
            }
        };

        Ok(AccountState {
            address: state
                .account
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| self.signer.account.clone()),
            nonce: state.nonce,
            balance,
        })
    }

    fn deploy(&self, payload: &Payload, args: &[String]) -> Result<String, TargetError> {
        let mut cli_args = self.base_args();
        cli_args.extend(["contract".to_string(), "deploy".to_string()]);
        cli_args.extend(self.signer_args());
        cli_args.extend([
            "--payload".to_string(),
            payload.as_str().to_string(),
            self.signer.account.clone(),
        ]);
        if !args.is_empty() {
            cli_args.push(encode_args(args)?);
        }

        let tx = self.submit(cli_args)?;
        let receipt = self.wait_receipt(&tx)?;
        if receipt.status != STATUS_CREATED {
            return Err(TargetError::Rejected {
                detail: receipt.detail(),
                status: receipt.status,
            });
        }
        if receipt.contract_address.is_empty() {
            return Err(TargetError::Malformed(format!(
                "receipt {} has no contract address",
                tx
            )));
        }
        Ok(receipt.contract_address)
    }

    fn call(&self, address: &str, function: &str, args: &[String]) -> Result<String, TargetError> {
        let mut cli_args = self.base_args();
        cli_args.extend(["contract".to_string(), "call".to_string()]);
        cli_args.extend(self.signer_args());
        cli_args.extend([
            self.signer.account.clone(),
            address.to_string(),
            function.to_string(),
            encode_args(args)?,
        ]);

        let tx = self.submit(cli_args)?;
        let receipt = self.wait_receipt(&tx)?;
        if receipt.status != STATUS_SUCCESS {
            return Err(TargetError::Rejected {
                detail: receipt.detail(),
                status: receipt.status,
            });
        }
        Ok(receipt.detail())
    }

    fn query(&self, address: &str, function: &str, args: &[String]) -> Result<String, TargetError> {
        let mut cli_args = self.base_args();
        cli_args.extend([
            "contract".to_string(),
            "query".to_string(),
            address.to_string(),
            function.to_string(),
        ]);
        if !args.is_empty() {
            cli_args.push(encode_args(args)?);
        }

        let stdout = self.runner.run(&cli_args)?;
        // a JSON string result is unquoted, anything else is passed through
        Ok(serde_json::from_str::<String>(&stdout).unwrap_or(stdout))
    }
}
