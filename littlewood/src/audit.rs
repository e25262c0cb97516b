//! Completeness check for the stored blocks of one degree.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow};

use crate::core::encoder::{block_range, max_code};
use crate::io::block_store::{list_blocks, read_block};
use crate::io::paths::WorkspacePaths;

/// What is stored for a degree, compared against the full code range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeAudit {
    pub degree: u32,
    pub blocks: usize,
    pub records: usize,
    /// Codes in `0..=max_code` with no stored record.
    pub missing: Vec<u64>,
    /// Codes stored more than once.
    pub duplicates: Vec<u64>,
    /// Problems with individual blocks (wrong degree, wrong range, gaps).
    pub block_errors: Vec<String>,
}

impl DegreeAudit {
    /// Every code stored exactly once in the block that owns it.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.duplicates.is_empty() && self.block_errors.is_empty()
    }
}

/// Read every block of `degree` and check coverage of `0..=max_code(degree)`.
pub fn audit_degree(paths: &WorkspacePaths, degree: u32) -> Result<DegreeAudit> {
    let max = max_code(degree).ok_or_else(|| anyhow!("degree {degree} cannot be audited"))?;
    let mut counts: BTreeMap<u64, u32> = BTreeMap::new();
    let mut block_errors = Vec::new();
    let mut records = 0usize;

    let blocks = list_blocks(paths, degree)?;
    for block in &blocks {
        let stored = read_block(&block.path)?;
        records += stored.len();
        let codes: Vec<u64> = stored.iter().map(|r| r.coeff_code).collect();
        if stored.iter().any(|r| r.degree != degree) {
            block_errors.push(format!(
                "block {} holds records of another degree",
                block.id.number
            ));
        }
        match block_range(degree, block.id.number) {
            Some((first, last)) => {
                let expected: Vec<u64> = (first..=last).collect();
                if codes != expected {
                    block_errors.push(format!(
                        "block {} should hold codes {first}..={last}",
                        block.id.number
                    ));
                }
            }
            None => block_errors.push(format!(
                "block {} is past the last block",
                block.id.number
            )),
        }
        for code in codes {
            *counts.entry(code).or_default() += 1;
        }
    }

    let duplicates = counts
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(code, _)| *code)
        .collect();
    let missing = missing_codes(&counts, max);

    Ok(DegreeAudit {
        degree,
        blocks: blocks.len(),
        records,
        missing,
        duplicates,
        block_errors,
    })
}

fn missing_codes(counts: &BTreeMap<u64, u32>, max: u64) -> Vec<u64> {
    let mut missing = Vec::new();
    let mut next = Some(0u64);
    for &code in counts.keys().filter(|code| **code <= max) {
        if let Some(start) = next {
            missing.extend(start..code);
        }
        next = code.checked_add(1);
    }
    if let Some(start) = next.filter(|start| *start <= max) {
        missing.extend(start..=max);
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Block, BlockId, RootRecord};
    use crate::io::block_store::write_block;

    fn store(paths: &WorkspacePaths, degree: u32, number: u64, codes: &[u64]) {
        let block = Block {
            id: BlockId { degree, number },
            records: codes
                .iter()
                .map(|&code| RootRecord {
                    coeff_code: code,
                    degree,
                    roots: Vec::new(),
                })
                .collect(),
        };
        write_block(paths, &block).expect("write");
    }

    #[test]
    fn empty_degree_is_missing_everything() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = WorkspacePaths::new(temp.path());
        let audit = audit_degree(&paths, 2).expect("audit");
        assert_eq!(audit.blocks, 0);
        assert_eq!(audit.missing, (0..=7).collect::<Vec<_>>());
        assert!(!audit.is_complete());
    }

    #[test]
    fn complete_degree_passes() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = WorkspacePaths::new(temp.path());
        store(&paths, 4, 0, &(0..20).collect::<Vec<_>>());
        store(&paths, 4, 1, &(20..32).collect::<Vec<_>>());
        let audit = audit_degree(&paths, 4).expect("audit");
        assert_eq!(audit.records, 32);
        assert!(audit.is_complete(), "{audit:?}");
    }

    #[test]
    fn partial_degree_reports_tail_as_missing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = WorkspacePaths::new(temp.path());
        store(&paths, 4, 0, &(0..20).collect::<Vec<_>>());
        let audit = audit_degree(&paths, 4).expect("audit");
        assert_eq!(audit.missing, (20..=31).collect::<Vec<_>>());
        assert!(audit.block_errors.is_empty());
    }

    #[test]
    fn misplaced_and_repeated_codes_are_reported() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = WorkspacePaths::new(temp.path());
        store(&paths, 1, 0, &[0, 1, 1, 3]);
        let audit = audit_degree(&paths, 1).expect("audit");
        assert_eq!(audit.missing, vec![2]);
        assert_eq!(audit.duplicates, vec![1]);
        assert_eq!(audit.block_errors.len(), 1);
    }
}
