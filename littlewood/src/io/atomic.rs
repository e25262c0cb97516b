//! Atomic file replacement shared by the progress and block stores.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Write `contents` to `path` via a sibling temp file and rename.
///
/// The parent directory is created if missing. Readers see either the old
/// file or the complete new one.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = temp_path(path);
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}

/// `<name>.tmp` next to `path`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_parent_and_leaves_no_temp_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("Roots").join("Degree_2").join("block_0.json");

        write_atomic(&path, "[]").expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "[]");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn replaces_existing_contents() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("state.json");
        write_atomic(&path, "old").expect("first write");
        write_atomic(&path, "new").expect("second write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "new");
    }

    #[test]
    fn temp_file_sits_beside_target() {
        assert_eq!(
            temp_path(Path::new("/work/state.json")),
            Path::new("/work/state.json.tmp")
        );
    }
}
