//! Canonical paths inside a working directory.

use std::path::{Path, PathBuf};

use crate::core::types::BlockId;

/// All fixed locations the enumerator reads and writes under `root`.
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    /// `state.json`: last durably stored position.
    pub progress_path: PathBuf,
    /// `Roots/`: one sub-directory per degree.
    pub roots_dir: PathBuf,
    /// `littlewood.toml`: optional settings.
    pub config_path: PathBuf,
}

impl WorkspacePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            progress_path: root.join("state.json"),
            roots_dir: root.join("Roots"),
            config_path: root.join("littlewood.toml"),
            root,
        }
    }

    /// `Roots/Degree_<degree>`.
    pub fn degree_dir(&self, degree: u32) -> PathBuf {
        self.roots_dir.join(format!("Degree_{degree}"))
    }

    /// `Roots/Degree_<degree>/block_<number>.json`.
    pub fn block_path(&self, id: BlockId) -> PathBuf {
        self.degree_dir(id.degree)
            .join(format!("block_{}.json", id.number))
    }

    /// Resolve a user-supplied path against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// Parse a block number out of a `block_<number>.json` file name.
pub fn parse_block_file_name(name: &str) -> Option<u64> {
    name.strip_prefix("block_")?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_fixed_layout() {
        let paths = WorkspacePaths::new("/work");
        assert!(paths.progress_path.ends_with("state.json"));
        assert_eq!(
            paths.block_path(BlockId {
                degree: 7,
                number: 12
            }),
            Path::new("/work/Roots/Degree_7/block_12.json")
        );
    }

    #[test]
    fn relative_paths_resolve_under_root() {
        let paths = WorkspacePaths::new("/work");
        assert_eq!(
            paths.resolve(Path::new("out/roots.png")),
            Path::new("/work/out/roots.png")
        );
        assert_eq!(paths.resolve(Path::new("/tmp/a.png")), Path::new("/tmp/a.png"));
    }

    #[test]
    fn block_file_names_parse_strictly() {
        assert_eq!(parse_block_file_name("block_0.json"), Some(0));
        assert_eq!(parse_block_file_name("block_42.json"), Some(42));
        assert_eq!(parse_block_file_name("block_42.json.tmp"), None);
        assert_eq!(parse_block_file_name("block_x.json"), None);
        assert_eq!(parse_block_file_name("notes.txt"), None);
    }
}
