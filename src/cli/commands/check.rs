//! Check command implementation.
//!
//! Provides `cairn check`, which validates already-vendored modules
//! without touching the filesystem otherwise.

use std::path::PathBuf;

use console::style;

use crate::error::Result;
use crate::updates::VERSION;
use crate::vendor::{ensure_compatibility, Requirements};

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    project: Option<PathBuf>,
    quiet: bool,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project: Option<PathBuf>, quiet: bool) -> Self {
        Self { project, quiet }
    }
}

impl Command for CheckCommand {
    fn execute(&self) -> Result<CommandResult> {
        ensure_compatibility(self.project.as_deref(), &Requirements::builtin(), VERSION)?;

        if !self.quiet {
            println!(
                "{} Vendored modules are compatible with cairn {}",
                style("✓").green(),
                VERSION
            );
        }

        Ok(CommandResult::success())
    }
}
