//! First-init scaffolding for the `cairn.mod` directory.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{CairnError, Result};

use super::{module_dir, DESCRIPTOR_FILE, PKG_DIR};

/// Header identifying files written by the vendoring process.
const GENERATED_HEADER: &str = "# generated by cairn";

/// Ensure the project's module scaffold exists.
///
/// Creates `cairn.mod/` and `cairn.mod/pkg/`, and writes the module
/// descriptor declaring `module_id` only when no descriptor exists yet.
/// An existing descriptor is never overwritten, so re-running is safe.
pub fn ensure_scaffold(root: &Path, module_id: &str) -> Result<()> {
    let mod_dir = module_dir(root);
    fs::create_dir_all(&mod_dir).map_err(|source| CairnError::Scaffold {
        path: mod_dir.clone(),
        source,
    })?;

    let descriptor = mod_dir.join(DESCRIPTOR_FILE);
    if !descriptor.exists() {
        debug!(root = %root.display(), "initializing cairn.mod");
        fs::write(&descriptor, format!("module: \"{module_id}\"\n")).map_err(|source| {
            CairnError::Scaffold {
                path: descriptor.clone(),
                source,
            }
        })?;
    }

    let pkg = mod_dir.join(PKG_DIR);
    fs::create_dir_all(&pkg).map_err(|source| CairnError::Scaffold { path: pkg, source })?;

    Ok(())
}

/// Refresh the generated-files markers in the module cache.
///
/// Removes the ignore marker older tool generations wrote, then (re)writes
/// the attributes marker flagging the cache subtree as tool-generated.
/// Idempotent; a user-authored `.gitignore` without the generated header is
/// left alone.
pub fn refresh_generated_markers(pkg_dir: &Path) -> Result<()> {
    let gitignore = pkg_dir.join(".gitignore");
    if let Ok(contents) = fs::read_to_string(&gitignore) {
        if contents.starts_with(GENERATED_HEADER) {
            let _ = fs::remove_file(&gitignore);
        }
    }

    fs::write(
        pkg_dir.join(".gitattributes"),
        format!("{GENERATED_HEADER}\n** linguist-generated=true\n"),
    )?;

    Ok(())
}
