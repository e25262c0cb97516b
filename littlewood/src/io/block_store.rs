//! Block files under `Roots/Degree_<d>/`.
//!
//! A block file is written once per `(degree, number)` and named by that pair
//! alone, so re-storing the same block after an interrupted run replaces the
//! file with identical content.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use super::atomic::write_atomic;
use super::paths::{WorkspacePaths, parse_block_file_name};
use crate::core::types::{Block, BlockId, RootRecord};

/// A block file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlock {
    pub id: BlockId,
    pub path: PathBuf,
}

/// Write `block` to its canonical path (temp file + rename).
pub fn write_block(paths: &WorkspacePaths, block: &Block) -> Result<PathBuf> {
    let path = paths.block_path(block.id);
    let buf = serde_json::to_string(&block.records).context("serialize block")?;
    write_atomic(&path, &buf).with_context(|| format!("write block {}", path.display()))?;
    debug!(
        path = %path.display(),
        records = block.records.len(),
        "block written"
    );
    Ok(path)
}

/// Read the records of one block file.
pub fn read_block(path: &Path) -> Result<Vec<RootRecord>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read block {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse block {}", path.display()))
}

/// List the block files of `degree`, ordered by block number.
///
/// A degree that was never processed has no directory and yields no blocks.
pub fn list_blocks(paths: &WorkspacePaths, degree: u32) -> Result<Vec<StoredBlock>> {
    let dir = paths.degree_dir(degree);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut blocks = Vec::new();
    for entry in fs::read_dir(&dir).with_context(|| format!("read {}", dir.display()))? {
        let entry = entry.context("read entry")?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        match parse_block_file_name(&name) {
            Some(number) => blocks.push(StoredBlock {
                id: BlockId { degree, number },
                path: entry.path(),
            }),
            None => debug!(file = %name, "skipping non-block file"),
        }
    }
    blocks.sort_by_key(|block| block.id);
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn record(code: u64, degree: u32) -> RootRecord {
        RootRecord {
            coeff_code: code,
            degree,
            roots: vec![Complex64::new(code as f64, -0.25)],
        }
    }

    fn block(degree: u32, number: u64, codes: std::ops::Range<u64>) -> Block {
        Block {
            id: BlockId { degree, number },
            records: codes.map(|code| record(code, degree)).collect(),
        }
    }

    #[test]
    fn written_block_reads_back_in_order() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = WorkspacePaths::new(temp.path());
        let stored = block(4, 1, 20..32);

        let path = write_block(&paths, &stored).expect("write");
        assert!(path.ends_with("Roots/Degree_4/block_1.json"));
        assert_eq!(read_block(&path).expect("read"), stored.records);
    }

    #[test]
    fn block_file_uses_external_record_format() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = WorkspacePaths::new(temp.path());
        let path = write_block(&paths, &block(1, 0, 2..3)).expect("write");
        let contents = fs::read_to_string(path).expect("read");
        assert_eq!(
            contents,
            r#"[{"CoeffCode":2,"Degree":1,"Roots":[[2.0,-0.25]]}]"#
        );
    }

    /// Storing the same block twice (restart before progress was saved)
    /// leaves one file with the latest content.
    #[test]
    fn rewriting_a_block_replaces_it() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = WorkspacePaths::new(temp.path());
        write_block(&paths, &block(5, 0, 0..20)).expect("first write");
        let path = write_block(&paths, &block(5, 0, 0..20)).expect("second write");

        assert_eq!(read_block(&path).expect("read").len(), 20);
        assert_eq!(list_blocks(&paths, 5).expect("list").len(), 1);
    }

    #[test]
    fn list_orders_numerically_and_skips_strays() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = WorkspacePaths::new(temp.path());
        for number in [10, 2, 0] {
            let first = number * 20;
            write_block(&paths, &block(7, number, first..first + 20)).expect("write");
        }
        fs::write(paths.degree_dir(7).join("block_3.json.tmp"), "[").expect("stray");

        let numbers: Vec<u64> = list_blocks(&paths, 7)
            .expect("list")
            .iter()
            .map(|b| b.id.number)
            .collect();
        assert_eq!(numbers, vec![0, 2, 10]);
    }

    #[test]
    fn missing_degree_lists_nothing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = WorkspacePaths::new(temp.path());
        assert!(list_blocks(&paths, 12).expect("list").is_empty());
    }

    #[test]
    fn corrupt_block_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = WorkspacePaths::new(temp.path());
        let dir = paths.degree_dir(3);
        fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join("block_0.json");
        fs::write(&path, "[{\"CoeffCode\": 1}]").expect("write");
        let err = read_block(&path).expect_err("corrupt");
        assert!(format!("{err:#}").contains("parse block"));
    }
}
