//! Bundle extraction into a staging directory.

use std::fs;
use std::path::Path;

use crate::error::{CairnError, Result};
use crate::project::{MODULE_DIR, PKG_DIR};

use super::source::BundleSource;

/// Copy every module source file in `bundle` into `dest`.
///
/// Regular files are mirrored at their relative paths, creating parent
/// directories as needed. A module's own vendored dependencies (anything
/// under a nested `cairn.mod/pkg/`) are packaging metadata and are not
/// extracted. Extracting the same bundle twice into empty destinations
/// yields byte-identical trees.
pub fn extract(bundle: &dyn BundleSource, dest: &Path) -> Result<()> {
    for path in bundle.files() {
        if under_nested_pkg(&path) {
            continue;
        }

        let Some(contents) = bundle.contents(&path) else {
            continue;
        };

        let target = dest.join(&path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| CairnError::Extract {
                path: path.clone(),
                source,
            })?;
        }

        fs::write(&target, contents).map_err(|source| CairnError::Extract {
            path: path.clone(),
            source,
        })?;

        // Embedded shell assets must stay runnable after extraction.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&target, fs::Permissions::from_mode(0o700)).map_err(|source| {
                CairnError::Extract {
                    path: path.clone(),
                    source,
                }
            })?;
        }
    }

    Ok(())
}

/// True when `path` falls under a module's own `cairn.mod/pkg/` subtree.
fn under_nested_pkg(path: &Path) -> bool {
    let components: Vec<_> = path.components().map(|c| c.as_os_str()).collect();
    components
        .windows(2)
        .any(|pair| pair[0] == MODULE_DIR && pair[1] == PKG_DIR)
}
