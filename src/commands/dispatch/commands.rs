//! Command implementations for all hatecheck commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use hatecheck_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        dispatch_command::execute(self, ctx)
    }
}

pub(super) mod dispatch_command {
    use super::*;

    use crate::commands;
    use crate::commands::dispatch::macros::trace_command;

    pub(super) fn execute(cmd: &Commands, ctx: &CommandContext) -> Result<()> {
        match cmd {
            Commands::Init {
                embedding_dim,
                password_cost,
            } => commands::init::execute(ctx.cli, ctx.root, *embedding_dim, *password_cost),
            Commands::Register {
                username,
                email,
                password,
            } => {
                let store = open_store(ctx)?;
                commands::accounts::register(ctx.cli, store, username, email, password)
            }
            Commands::Token { username, password } => {
                let store = open_store(ctx)?;
                commands::accounts::token(ctx.cli, store, username, password)
            }
            Commands::Predict { token, text } => {
                let store = open_store(ctx)?;
                let result = commands::predict::execute(ctx.cli, store, token, text.as_deref());
                trace_command!(ctx.cli, ctx.start, "execute_command");
                result
            }
            Commands::RequestCount { username } => {
                let store = open_store(ctx)?;
                commands::accounts::request_count(ctx.cli, store, username)
            }
            Commands::Preprocess { text, stages } => {
                commands::preprocess::execute(ctx, text.as_deref(), *stages)
            }
        }
    }

    fn open_store(ctx: &CommandContext) -> Result<hatecheck_core::store::Store> {
        let store = ctx.discover_or_open_store()?;
        trace_command!(ctx.cli, ctx.start, "discover_store");
        Ok(store)
    }
}
