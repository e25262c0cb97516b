//! Shared data types for enumeration records, blocks and progress.
//!
//! The serialized field names (`CoeffCode`, `Degree`, `Roots`) are the on-disk
//! format of block and progress files and must stay stable.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Roots of one Littlewood polynomial, keyed by `(degree, coeff_code)`.
///
/// Roots serialize as `[re, im]` pairs; their order is whatever the solver
/// returned and carries no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootRecord {
    #[serde(rename = "CoeffCode")]
    pub coeff_code: u64,
    #[serde(rename = "Degree")]
    pub degree: u32,
    #[serde(rename = "Roots")]
    pub roots: Vec<Complex64>,
}

/// Last durably stored position (`state.json`).
///
/// Every code up to and including `coeff_code` of `degree` has been written to
/// a block; `coeff_code == 0` means nothing of `degree` is stored yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    #[serde(rename = "Degree")]
    pub degree: u32,
    #[serde(rename = "CoeffCode")]
    pub coeff_code: u64,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            degree: 1,
            coeff_code: 0,
        }
    }
}

/// Identity of a block file: `Roots/Degree_<degree>/block_<number>.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId {
    pub degree: u32,
    pub number: u64,
}

/// Up to [`BLOCK_SIZE`](crate::core::encoder::BLOCK_SIZE) records of one
/// degree with contiguous codes.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub records: Vec<RootRecord>,
}

impl Block {
    /// First and last code stored in this block.
    pub fn code_range(&self) -> Option<(u64, u64)> {
        let first = self.records.first()?.coeff_code;
        let last = self.records.last()?.coeff_code;
        Some((first, last))
    }
}

/// Position of the next code to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub degree: u32,
    pub code: u64,
}
