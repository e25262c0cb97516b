//! Test-only helpers: temporary working directories and instrumented solvers.

use std::cell::Cell;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use num_complex::Complex64;
use tempfile::TempDir;

use crate::core::solver::{CompanionSolver, RootSolver};
use crate::core::types::ProgressState;
use crate::io::block_store::{list_blocks, read_block};
use crate::io::paths::WorkspacePaths;
use crate::io::progress::peek_progress;

/// Temporary working directory with the canonical layout helpers.
pub struct TestWorkspace {
    dir: TempDir,
    paths: WorkspacePaths,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        let paths = WorkspacePaths::new(dir.path());
        Ok(Self { dir, paths })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn paths(&self) -> &WorkspacePaths {
        &self.paths
    }

    /// Progress on disk, failing if none was written yet.
    pub fn progress(&self) -> Result<ProgressState> {
        peek_progress(&self.paths.progress_path)?.ok_or_else(|| anyhow!("no progress file"))
    }

    /// Codes of every stored block of `degree`, one inner vector per block.
    pub fn block_codes(&self, degree: u32) -> Result<Vec<Vec<u64>>> {
        list_blocks(&self.paths, degree)?
            .iter()
            .map(|block| {
                let records = read_block(&block.path)?;
                Ok(records.iter().map(|r| r.coeff_code).collect())
            })
            .collect()
    }
}

/// Wraps a solver and counts how many polynomials it was asked to solve.
#[derive(Debug, Default)]
pub struct CountingSolver {
    inner: CompanionSolver,
    calls: Cell<usize>,
}

impl CountingSolver {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl RootSolver for CountingSolver {
    fn roots(&self, coefficients: &[f64]) -> Result<Vec<Complex64>> {
        self.calls.set(self.calls.get() + 1);
        self.inner.roots(coefficients)
    }
}

/// Solver that succeeds `budget` times and then fails, simulating a run
/// killed partway through a block.
#[derive(Debug)]
pub struct InterruptingSolver {
    inner: CompanionSolver,
    remaining: Cell<usize>,
}

impl InterruptingSolver {
    pub fn new(budget: usize) -> Self {
        Self {
            inner: CompanionSolver::default(),
            remaining: Cell::new(budget),
        }
    }
}

impl RootSolver for InterruptingSolver {
    fn roots(&self, coefficients: &[f64]) -> Result<Vec<Complex64>> {
        let remaining = self.remaining.get();
        if remaining == 0 {
            return Err(anyhow!("interrupted"));
        }
        self.remaining.set(remaining - 1);
        self.inner.roots(coefficients)
    }
}
