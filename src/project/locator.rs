//! Project root discovery.

use std::path::{Path, PathBuf};

use super::MODULE_DIR;

/// Find the project root by walking ancestor directories for `cairn.mod`.
///
/// Starts at `start` (or the current working directory when `None`) and
/// probes each ancestor in turn. Returns the first directory containing the
/// marker and `true`, or the starting directory and `false` if the walk
/// reaches the filesystem root without a match. Never creates anything;
/// absence is a normal outcome, not an error.
pub fn find_module_root(start: Option<&Path>) -> (PathBuf, bool) {
    let origin = match start {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    let mut dir = origin.clone();
    loop {
        if dir.join(MODULE_DIR).exists() {
            return (dir, true);
        }
        match dir.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => dir = parent.to_path_buf(),
            _ => return (origin, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_marker_in_start_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(MODULE_DIR)).unwrap();

        let (root, found) = find_module_root(Some(temp.path()));

        assert!(found);
        assert_eq!(root, temp.path());
    }

    #[test]
    fn finds_marker_in_ancestor() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(MODULE_DIR)).unwrap();
        let nested = temp.path().join("a").join("b").join("c");
        fs::create_dir_all(&nested).unwrap();

        let (root, found) = find_module_root(Some(&nested));

        assert!(found);
        assert_eq!(root, temp.path());
    }

    #[test]
    fn returns_start_dir_when_not_found() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("deep").join("down");
        fs::create_dir_all(&nested).unwrap();

        let (root, found) = find_module_root(Some(&nested));

        assert!(!found);
        assert_eq!(root, nested);
    }

    #[test]
    fn marker_file_is_not_a_match_requirement() {
        // A cairn.mod *file* still counts as presence; the walk only probes
        // for existence, matching how projects are detected elsewhere.
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(MODULE_DIR), "").unwrap();

        let (_, found) = find_module_root(Some(temp.path()));
        assert!(found);
    }
}
