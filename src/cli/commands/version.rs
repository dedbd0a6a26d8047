//! Version command implementation.
//!
//! Provides `cairn version [--check]`.

use console::style;

use crate::cli::args::VersionArgs;
use crate::error::Result;
use crate::updates::{check_for_updates_fresh, VERSION};

use super::dispatcher::{Command, CommandResult};

/// The version command implementation.
pub struct VersionCommand {
    args: VersionArgs,
}

impl VersionCommand {
    /// Create a new version command.
    pub fn new(args: VersionArgs) -> Self {
        Self { args }
    }
}

impl Command for VersionCommand {
    fn execute(&self) -> Result<CommandResult> {
        println!("cairn {VERSION}");

        if !self.args.check {
            return Ok(CommandResult::success());
        }

        match check_for_updates_fresh() {
            Ok(info) if info.update_available => {
                println!(
                    "{} cairn {} is available{}",
                    style("↑").yellow(),
                    info.latest,
                    info.release_url
                        .map(|url| format!(" ({url})"))
                        .unwrap_or_default()
                );
                Ok(CommandResult::success())
            }
            Ok(_) => {
                println!("{} You are on the latest release", style("✓").green());
                Ok(CommandResult::success())
            }
            Err(e) => {
                eprintln!("{} Could not reach the release feed: {e}", style("!").red());
                Ok(CommandResult::failure(1))
            }
        }
    }
}
