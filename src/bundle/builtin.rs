//! Built-in modules embedded at compile time.

use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir};

use super::source::BundleSource;

/// Embedded module bundle.
static MODULES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/modules");

/// The bundle of built-in modules compiled into this binary.
///
/// Contains one subtree per built-in module (`cairn.dev`,
/// `basecamp.cairn.dev`, ...), mirroring the layout they are vendored with.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedBundle;

impl BundleSource for EmbeddedBundle {
    fn files(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        collect_files(&MODULES_DIR, &mut paths);
        paths.sort();
        paths
    }

    fn contents(&self, path: &Path) -> Option<&[u8]> {
        MODULES_DIR.get_file(path).map(|f| f.contents())
    }
}

fn collect_files(dir: &Dir<'static>, paths: &mut Vec<PathBuf>) {
    for file in dir.files() {
        paths.push(file.path().to_path_buf());
    }
    for sub in dir.dirs() {
        collect_files(sub, paths);
    }
}
