//! TargetClient port - the remote stateful execution target
//!
//! `deploy` and `call` block until the submission reaches a terminal status
//! (or the client's bounded wait expires). `query` is read-only and immediate.

use std::time::Duration;

use crate::domain::value_objects::Payload;

/// Target operation errors
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TargetError {
    /// Submission reached a non-success terminal status
    #[error("rejected with status {status}: {detail}")]
    Rejected { status: String, detail: String },

    /// Submission was not confirmed within the bounded wait
    #[error("transaction {tx} not confirmed within {waited:?}")]
    Timeout { tx: String, waited: Duration },

    /// Target could not be reached
    #[error("transport error: {0}")]
    Transport(String),

    /// Target answered with something we cannot interpret
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Nonce and balance of the account that signs submissions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountState {
    pub address: String,
    pub nonce: u64,
    /// Balance as reported by the target, unit included if it reports one
    pub balance: String,
}

impl AccountState {
    /// Whether the account cannot pay for a single submission
    pub fn is_unfunded(&self) -> bool {
        is_zero_balance(&self.balance)
    }
}

/// Whether a reported balance such as `0`, `0.0 aergo` or an empty string is zero
pub fn is_zero_balance(balance: &str) -> bool {
    let amount = balance.split_whitespace().next().unwrap_or("");
    amount.chars().all(|c| c == '0' || c == '.')
}

/// Client for the remote execution target
pub trait TargetClient {
    /// State of the signing account
    fn account_state(&self) -> Result<AccountState, TargetError>;

    /// Deploy `payload` with constructor `args`; returns the assigned address
    fn deploy(&self, payload: &Payload, args: &[String]) -> Result<String, TargetError>;

    /// Mutating call on a deployed module
    fn call(&self, address: &str, function: &str, args: &[String]) -> Result<String, TargetError>;

    /// Read-only query on a deployed module
    fn query(&self, address: &str, function: &str, args: &[String])
        -> Result<String, TargetError>;
}

impl<T: TargetClient + ?Sized> TargetClient for &T {
    fn account_state(&self) -> Result<AccountState, TargetError> {
        (**self).account_state()
    }

    fn deploy(&self, payload: &Payload, args: &[String]) -> Result<String, TargetError> {
        (**self).deploy(payload, args)
    }

    fn call(&self, address: &str, function: &str, args: &[String]) -> Result<String, TargetError> {
        (**self).call(address, function, args)
    }

    fn query(
        &self,
        address: &str,
        function: &str,
        args: &[String],
    ) -> Result<String, TargetError> {
        (**self).query(address, function, args)
    }
}
