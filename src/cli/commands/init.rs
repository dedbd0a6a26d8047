//! Init command implementation.
//!
//! Provides `cairn init`, which creates the project's `cairn.mod` scaffold.

use std::path::PathBuf;

use console::style;

use crate::cli::args::InitArgs;
use crate::error::Result;
use crate::project::{ensure_scaffold, module_dir};

use super::dispatcher::{Command, CommandResult};

/// The init command implementation.
pub struct InitCommand {
    project: Option<PathBuf>,
    args: InitArgs,
    quiet: bool,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(project: Option<PathBuf>, args: InitArgs, quiet: bool) -> Self {
        Self {
            project,
            args,
            quiet,
        }
    }
}

impl Command for InitCommand {
    fn execute(&self) -> Result<CommandResult> {
        // Init acts on the named directory, never on a discovered ancestor.
        let root = match &self.project {
            Some(p) => p.clone(),
            None => std::env::current_dir()?,
        };

        ensure_scaffold(&root, &self.args.module)?;

        if !self.quiet {
            println!(
                "{} Initialized {}",
                style("✓").green(),
                module_dir(&root).display()
            );
        }

        Ok(CommandResult::success())
    }
}
