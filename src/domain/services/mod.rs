//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod cascade;
mod change;
mod drift;

pub use cascade::{plan_cascade, CascadeState, DeployDecision, DeployReason};
pub use change::{detect_change, CompileOutcome, CompileReason};
pub use drift::{check_drift, DriftStatus, GET_VERSION, SET_VERSION};
