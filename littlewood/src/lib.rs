//! Resumable enumeration of Littlewood polynomials and their roots.
//!
//! Every polynomial of degree `D` with coefficients in `{+1, -1}` is named by
//! an integer code in `0..2^(D+1)`. The enumerator walks codes degree by
//! degree, stores the roots in blocks of 20 records under
//! `Roots/Degree_<D>/block_<n>.json`, and records the last stored code in
//! `state.json` after each block so a run can stop and resume at any point.
//!
//! - **[`core`]**: Pure, deterministic logic (code encoding, root solving,
//!   the Fill/Flush/Advance state machine). No filesystem access.
//! - **[`io`]**: Side-effecting operations (progress file, block files,
//!   configuration).
//!
//! Orchestration modules ([`enumerate`], [`render`], [`audit`]) coordinate
//! core logic with I/O to implement CLI actions.

pub mod audit;
pub mod core;
pub mod enumerate;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod render;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
