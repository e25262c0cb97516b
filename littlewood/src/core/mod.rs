//! Deterministic, pure logic for the enumeration core.
//!
//! Core modules must be free of filesystem side effects. They operate on
//! in-memory values and return deterministic outputs suitable for tests.

pub mod encoder;
pub mod engine;
pub mod solver;
pub mod types;
