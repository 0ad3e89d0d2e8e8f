//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use crate::cli::paths::resolve_store_path;
use crate::cli::{Cli, OutputFormat};
use crate::commands::output::print_json;
use hatecheck_core::error::Result;
use hatecheck_core::service::DetectionService;
use hatecheck_core::store::Store;

/// Discover or open a store based on CLI configuration
pub fn discover_or_open_store(cli: &Cli, root: &PathBuf) -> Result<Store> {
    match &cli.store {
        Some(path) => Store::open(&resolve_store_path(root, path)),
        None => Store::discover(root),
    }
}

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a PathBuf, start: Instant) -> Self {
        Self { cli, root, start }
    }

    pub fn discover_or_open_store(&self) -> Result<Store> {
        discover_or_open_store(self.cli, self.root)
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No subcommand: print the index message
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let index = DetectionService::index();
        match ctx.cli.format {
            OutputFormat::Json => print_json(&index),
            OutputFormat::Human => {
                println!("{}", index.message.trim_end());
                if !ctx.cli.quiet {
                    println!();
                    println!("Run `hatecheck --help` for usage information.");
                }
                Ok(())
            }
        }
    }
}
