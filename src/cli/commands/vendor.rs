//! Vendor command implementation.
//!
//! Provides `cairn vendor`, which runs one vendoring transaction against
//! the project's module cache.

use std::path::PathBuf;

use console::style;

use crate::bundle::EmbeddedBundle;
use crate::error::Result;
use crate::updates::VERSION;
use crate::vendor::{Requirements, VendorTransaction};

use super::dispatcher::{Command, CommandResult};

/// The vendor command implementation.
pub struct VendorCommand {
    project: Option<PathBuf>,
    quiet: bool,
}

impl VendorCommand {
    /// Create a new vendor command.
    pub fn new(project: Option<PathBuf>, quiet: bool) -> Self {
        Self { project, quiet }
    }
}

impl Command for VendorCommand {
    fn execute(&self) -> Result<CommandResult> {
        let requirements = Requirements::builtin();
        let bundle = EmbeddedBundle;

        let transaction = VendorTransaction::new(&requirements, &bundle, VERSION);
        transaction.run(self.project.as_deref())?;

        if !self.quiet {
            println!(
                "{} Vendored {} modules",
                style("✓").green(),
                requirements.len()
            );
        }

        Ok(CommandResult::success())
    }
}
