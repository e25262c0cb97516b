//! Orchestration for `littlewood --run <N>`.
//!
//! Each block goes Fill -> Flush -> Advance, and the progress file is written
//! only after the block file is in place. An interrupted run therefore
//! recomputes at most the block in flight and rewrites it under the same name.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::engine::EnumerationState;
use crate::core::solver::RootSolver;
use crate::core::types::{BlockId, Position, ProgressState};
use crate::io::block_store::write_block;
use crate::io::paths::WorkspacePaths;
use crate::io::progress::{load_progress, write_progress};

/// One stored block, reported to the `on_block` callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutcome {
    pub id: BlockId,
    pub path: PathBuf,
    pub records: usize,
    pub first_code: u64,
    pub last_code: u64,
    /// The block held its degree's maximum code.
    pub degree_finished: bool,
    /// Progress persisted after this block.
    pub progress: ProgressState,
}

/// Summary of a `run_blocks` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub started_at: Position,
    pub blocks_flushed: u32,
    /// Progress on disk when the run stopped.
    pub progress: ProgressState,
}

/// Compute and store `blocks` blocks, resuming from the progress file in `root`.
///
/// Stops on the first error; everything stored before it stays stored and the
/// progress file still describes it.
pub fn run_blocks<S: RootSolver, F: FnMut(&BlockOutcome)>(
    root: &Path,
    solver: &S,
    blocks: u32,
    mut on_block: F,
) -> Result<RunOutcome> {
    let paths = WorkspacePaths::new(root);
    let mut progress = load_progress(&paths.progress_path)
        .with_context(|| format!("load {}", paths.progress_path.display()))?;
    let mut state = EnumerationState::resume(&progress)
        .with_context(|| format!("resume from {}", paths.progress_path.display()))?;
    let started_at = state.position();
    info!(
        degree = started_at.degree,
        code = started_at.code,
        blocks,
        "starting enumeration"
    );

    let mut blocks_flushed = 0u32;
    while blocks_flushed < blocks {
        state.fill(solver)?;
        let degree_finished = state.degree_finished;
        let block = state.flush()?;
        let path = write_block(&paths, &block)?;
        let next = state.advance(&block)?;
        write_progress(&paths.progress_path, &next)?;
        progress = next;
        blocks_flushed += 1;

        let (first_code, last_code) = block.code_range().unwrap_or_default();
        debug!(
            degree = block.id.degree,
            number = block.id.number,
            first_code,
            last_code,
            "block stored"
        );
        on_block(&BlockOutcome {
            id: block.id,
            path,
            records: block.records.len(),
            first_code,
            last_code,
            degree_finished,
            progress,
        });
    }

    Ok(RunOutcome {
        started_at,
        blocks_flushed,
        progress,
    })
}
