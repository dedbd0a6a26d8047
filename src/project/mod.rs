//! Project discovery and scaffolding.
//!
//! A Cairn project is any directory containing a `cairn.mod/` marker
//! directory. Vendored modules live underneath it in `cairn.mod/pkg/`.

mod locator;
mod scaffold;

pub use locator::find_module_root;
pub use scaffold::{ensure_scaffold, refresh_generated_markers};

use std::path::{Path, PathBuf};

/// Marker directory identifying a project root.
pub const MODULE_DIR: &str = "cairn.mod";

/// Descriptor file declaring the project's own module identifier.
pub const DESCRIPTOR_FILE: &str = "module.cairn";

/// Module cache directory name, relative to the marker directory.
pub const PKG_DIR: &str = "pkg";

/// Path of the marker directory for a project root.
pub fn module_dir(root: &Path) -> PathBuf {
    root.join(MODULE_DIR)
}

/// Path of the module cache for a project root.
pub fn pkg_dir(root: &Path) -> PathBuf {
    root.join(MODULE_DIR).join(PKG_DIR)
}
