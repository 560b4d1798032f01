//! In-memory stand-ins for the external compiler and target.

use std::cell::{Cell, RefCell};
use std::path::Path;

use hsc::domain::ports::{AccountState, CompileError, Compiler, TargetClient, TargetError};
use hsc::domain::services::{GET_VERSION, SET_VERSION};
use hsc::Payload;

/// Compiles a source by reading it; deterministic for identical contents.
///
/// A source containing `syntax error` fails like the real compiler's stderr.
#[derive(Default)]
pub struct SourceCompiler {
    pub invocations: Cell<usize>,
}

impl Compiler for SourceCompiler {
    fn compile(&self, source: &Path) -> Result<Payload, CompileError> {
        self.invocations.set(self.invocations.get() + 1);
        let content =
            std::fs::read_to_string(source).map_err(|e| CompileError::Spawn(e.to_string()))?;
        if content.contains("syntax error") {
            return Err(CompileError::Failed(format!(
                "{}:1: syntax error",
                source.display()
            )));
        }
        Ok(Payload::new(format!("bytecode({})", content.trim())))
    }
}

/// One recorded deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub payload: Payload,
    pub args: Vec<String>,
    pub address: String,
}

/// One recorded mutating call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub address: String,
    pub function: String,
    pub args: Vec<String>,
}

/// A target that assigns sequential addresses and remembers the root's version.
#[derive(Default)]
pub struct FakeChain {
    pub deployments: RefCell<Vec<Deployment>>,
    pub calls: RefCell<Vec<Call>>,
    pub queries: Cell<usize>,
    /// Version the root module reports through `getVersion`
    pub live_version: RefCell<Option<String>>,
    pub query_fails: Cell<bool>,
    /// Payloads containing this text are rejected
    pub reject_payload: RefCell<Option<String>>,
    /// The signing account has nothing to pay with
    pub unfunded: Cell<bool>,
    next_address: Cell<usize>,
}

impl FakeChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deploy_count(&self) -> usize {
        self.deployments.borrow().len()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Forget recorded traffic, keeping live state
    pub fn clear_log(&self) {
        self.deployments.borrow_mut().clear();
        self.calls.borrow_mut().clear();
        self.queries.set(0);
    }

    /// Simulate someone else re-stamping the live contract
    pub fn set_live_version(&self, version: &str) {
        *self.live_version.borrow_mut() = Some(version.to_string());
    }
}

impl TargetClient for FakeChain {
    fn account_state(&self) -> Result<AccountState, TargetError> {
        Ok(AccountState {
            address: "AmDeployer".to_string(),
            nonce: self.deployments.borrow().len() as u64 + self.calls.borrow().len() as u64,
            balance: if self.unfunded.get() { "0 aergo" } else { "1000 aergo" }.to_string(),
        })
    }

    fn deploy(&self, payload: &Payload, args: &[String]) -> Result<String, TargetError> {
        if let Some(marker) = self.reject_payload.borrow().as_deref() {
            if payload.as_str().contains(marker) {
                return Err(TargetError::Rejected {
                    status: "ERROR".to_string(),
                    detail: "constructor failed".to_string(),
                });
            }
        }
        let n = self.next_address.get() + 1;
        self.next_address.set(n);
        let address = format!("Am{}", n);
        self.deployments.borrow_mut().push(Deployment {
            payload: payload.clone(),
            args: args.to_vec(),
            address: address.clone(),
        });
        Ok(address)
    }

    fn call(&self, address: &str, function: &str, args: &[String]) -> Result<String, TargetError> {
        if function == SET_VERSION {
            *self.live_version.borrow_mut() = args.first().cloned();
        }
        self.calls.borrow_mut().push(Call {
            address: address.to_string(),
            function: function.to_string(),
            args: args.to_vec(),
        });
        Ok(String::new())
    }

    fn query(&self, _address: &str, function: &str, _args: &[String]) -> Result<String, TargetError> {
        self.queries.set(self.queries.get() + 1);
        if self.query_fails.get() {
            return Err(TargetError::Transport("connection refused".to_string()));
        }
        match function {
            GET_VERSION => Ok(self.live_version.borrow().clone().unwrap_or_default()),
            other => Err(TargetError::Malformed(format!("unknown function {}", other))),
        }
    }
}
