//! Common test utilities for hsc scenario and property tests.
//!
//! This module provides:
//! - `Workspace`: isolated project directory with sources and registries
//! - Fakes: a compiler that reads sources and an in-memory target chain

#![allow(dead_code)]

pub mod env;
pub mod fakes;

pub use env::*;
pub use fakes::*;
