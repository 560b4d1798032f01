//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod payload;
mod tier;

pub use payload::Payload;
pub use tier::Tier;
