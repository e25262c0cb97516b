//! Filesystem helpers for the enumerator's working directory.

pub mod atomic;
pub mod block_store;
pub mod config;
pub mod paths;
pub mod progress;
