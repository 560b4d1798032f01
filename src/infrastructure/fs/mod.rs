//! File System Infrastructure

mod local;

pub use local::atomic_write;
