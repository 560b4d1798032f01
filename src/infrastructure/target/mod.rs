//! Target Client Adapters

mod aergocli;
mod poll;

pub use aergocli::{
    AergoCliClient, CommandRunner, ProcessRunner, Signer, STATUS_CREATED, STATUS_SUCCESS,
};
pub use poll::Poller;
