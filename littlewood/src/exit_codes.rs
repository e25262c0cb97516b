//! Stable exit codes for the `littlewood` binary.

/// Every requested action succeeded.
pub const OK: i32 = 0;
/// An action failed (corrupt progress, unreadable block, solver failure, I/O error).
pub const INVALID: i32 = 1;
