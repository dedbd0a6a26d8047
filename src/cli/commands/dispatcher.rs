//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project: Option<PathBuf>,
    quiet: bool,
}

impl CommandDispatcher {
    /// Create a new dispatcher.
    ///
    /// `project` overrides marker-directory discovery when set.
    pub fn new(project: Option<PathBuf>, quiet: bool) -> Self {
        Self { project, quiet }
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli) -> Result<CommandResult> {
        match &cli.command {
            Commands::Init(args) => {
                let cmd = super::init::InitCommand::new(self.project.clone(), args.clone(), self.quiet);
                cmd.execute()
            }
            Commands::Vendor => {
                let cmd = super::vendor::VendorCommand::new(self.project.clone(), self.quiet);
                cmd.execute()
            }
            Commands::Check => {
                let cmd = super::check::CheckCommand::new(self.project.clone(), self.quiet);
                cmd.execute()
            }
            Commands::Version(args) => {
                let cmd = super::version::VersionCommand::new(args.clone());
                cmd.execute()
            }
        }
    }
}
