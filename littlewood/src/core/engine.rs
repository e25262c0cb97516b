//! Enumeration state machine.
//!
//! One block moves through three phases:
//!
//! - **Filling**: compute records for up to [`BLOCK_SIZE`] consecutive codes,
//!   never past the degree's maximum code.
//! - **Flushing**: hand the buffered records out as a [`Block`] for storage.
//! - **Advancing**: move the cursor past the stored block, crossing into the
//!   next degree first when the block finished its degree, and produce the
//!   [`ProgressState`] to persist.
//!
//! The state is an explicit value threaded through each transition; nothing
//! here touches the filesystem.

use std::ops::RangeInclusive;

use anyhow::{Result, anyhow, bail};
use tracing::debug;

use crate::core::encoder::{BLOCK_SIZE, MAX_DEGREE, block_number, encode, max_code};
use crate::core::solver::RootSolver;
use crate::core::types::{Block, BlockId, Position, ProgressState, RootRecord};

/// Current phase of the block cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Filling,
    Flushing,
    Advancing,
}

/// In-memory cursor and buffer for the block being built.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumerationState {
    pub degree: u32,
    /// First code of the block being built.
    pub next_code: u64,
    pub block_number: u64,
    pub buffer: Vec<RootRecord>,
    /// Set once the buffer holds the degree's maximum code.
    pub degree_finished: bool,
    pub phase: Phase,
}

impl EnumerationState {
    /// Start of a fresh enumeration: degree 1, code 0.
    pub fn new() -> Self {
        Self::at(1, 0)
    }

    fn at(degree: u32, next_code: u64) -> Self {
        Self {
            degree,
            next_code,
            block_number: block_number(next_code),
            buffer: Vec::new(),
            degree_finished: false,
            phase: Phase::Filling,
        }
    }

    /// Rebuild the cursor from persisted progress.
    ///
    /// A stored maximum code resumes at the next degree; a stored code 0 means
    /// nothing of that degree is stored yet; anything else resumes right after
    /// the stored code.
    pub fn resume(progress: &ProgressState) -> Result<Self> {
        let max = validate_progress(progress)?;
        let state = if progress.coeff_code == max {
            Self::at(next_degree(progress.degree)?, 0)
        } else if progress.coeff_code == 0 {
            Self::at(progress.degree, 0)
        } else {
            Self::at(progress.degree, progress.coeff_code + 1)
        };
        debug!(
            degree = state.degree,
            next_code = state.next_code,
            block_number = state.block_number,
            "resumed enumeration"
        );
        Ok(state)
    }

    pub fn position(&self) -> Position {
        Position {
            degree: self.degree,
            code: self.next_code,
        }
    }

    /// Codes the next fill will compute.
    pub fn pending_codes(&self) -> Result<RangeInclusive<u64>> {
        let max = max_code(self.degree)
            .ok_or_else(|| anyhow!("degree {} is outside 1..={MAX_DEGREE}", self.degree))?;
        if self.next_code > max {
            bail!(
                "code {} is past the maximum {max} of degree {}",
                self.next_code,
                self.degree
            );
        }
        let last = self.next_code.saturating_add(BLOCK_SIZE - 1).min(max);
        Ok(self.next_code..=last)
    }

    /// Fill the buffer with the records of [`Self::pending_codes`].
    ///
    /// Returns the number of records buffered. A solver failure leaves the
    /// state in `Filling` with nothing to flush.
    pub fn fill<S: RootSolver>(&mut self, solver: &S) -> Result<usize> {
        self.expect_phase(Phase::Filling)?;
        self.buffer.clear();
        let codes = self.pending_codes()?;
        let last = *codes.end();
        let mut records = Vec::with_capacity((last - codes.start() + 1) as usize);
        for code in codes {
            records.push(compute_record(code, self.degree, solver)?);
        }
        self.buffer = records;
        self.degree_finished = Some(last) == max_code(self.degree);
        self.phase = Phase::Flushing;
        debug!(
            degree = self.degree,
            block_number = self.block_number,
            records = self.buffer.len(),
            degree_finished = self.degree_finished,
            "filled block buffer"
        );
        Ok(self.buffer.len())
    }

    /// Take the buffered records as a block, leaving the buffer empty.
    pub fn flush(&mut self) -> Result<Block> {
        self.expect_phase(Phase::Flushing)?;
        let records = std::mem::take(&mut self.buffer);
        self.phase = Phase::Advancing;
        Ok(Block {
            id: BlockId {
                degree: self.degree,
                number: self.block_number,
            },
            records,
        })
    }

    /// Move past `flushed` and return the progress to persist.
    ///
    /// When the block finished its degree the cursor moves to the next degree
    /// before the progress value is produced, so the result is
    /// `{degree + 1, 0}` rather than the old degree's maximum.
    pub fn advance(&mut self, flushed: &Block) -> Result<ProgressState> {
        self.expect_phase(Phase::Advancing)?;
        let expected = BlockId {
            degree: self.degree,
            number: self.block_number,
        };
        if flushed.id != expected {
            bail!(
                "advance expected block {}/{} but got {}/{}",
                expected.degree,
                expected.number,
                flushed.id.degree,
                flushed.id.number
            );
        }
        let (_, last) = flushed
            .code_range()
            .ok_or_else(|| anyhow!("cannot advance past an empty block"))?;

        let progress = if self.degree_finished {
            let degree = next_degree(self.degree)?;
            *self = Self::at(degree, 0);
            ProgressState {
                degree,
                coeff_code: 0,
            }
        } else {
            self.next_code = last + 1;
            self.block_number += 1;
            self.phase = Phase::Filling;
            ProgressState {
                degree: self.degree,
                coeff_code: last,
            }
        };
        Ok(progress)
    }

    fn expect_phase(&self, phase: Phase) -> Result<()> {
        if self.phase != phase {
            bail!("expected phase {:?} but state is {:?}", phase, self.phase);
        }
        Ok(())
    }
}

impl Default for EnumerationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the record for one `(code, degree)` pair.
pub fn compute_record<S: RootSolver>(code: u64, degree: u32, solver: &S) -> Result<RootRecord> {
    let coefficients: Vec<f64> = encode(code, degree).into_iter().map(f64::from).collect();
    let roots = solver
        .roots(&coefficients)
        .map_err(|err| err.context(format!("roots of degree {degree} code {code}")))?;
    Ok(RootRecord {
        coeff_code: code,
        degree,
        roots,
    })
}

/// Check stored progress for semantic validity and return the degree's maximum code.
///
/// Only `0`, the degree's maximum, or the last code of a full block can have
/// been stored; anything else would resume mid-block and overwrite records.
pub fn validate_progress(progress: &ProgressState) -> Result<u64> {
    let max = max_code(progress.degree).ok_or_else(|| {
        anyhow!(
            "progress degree {} is outside 1..={MAX_DEGREE}",
            progress.degree
        )
    })?;
    if progress.coeff_code > max {
        bail!(
            "progress code {} exceeds the maximum {max} of degree {}",
            progress.coeff_code,
            progress.degree
        );
    }
    let code = progress.coeff_code;
    if code != 0 && code != max && (code + 1) % BLOCK_SIZE != 0 {
        bail!(
            "progress code {code} of degree {} is not the end of a block",
            progress.degree
        );
    }
    Ok(max)
}

fn next_degree(degree: u32) -> Result<u32> {
    if degree >= MAX_DEGREE {
        bail!("every supported degree up to {MAX_DEGREE} has been enumerated");
    }
    Ok(degree + 1)
}
