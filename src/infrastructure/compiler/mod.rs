//! Compiler Adapters

mod aergoluac;

pub use aergoluac::AergoLuaCompiler;
