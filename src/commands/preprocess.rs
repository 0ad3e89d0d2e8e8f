//! `hatecheck preprocess` command - run the text pipeline only
//!
//! Uses the store's stopword configuration when a store is found, the
//! built-in lists otherwise.

use crate::cli::Cli;
use crate::commands::dispatch::CommandContext;
use crate::commands::output::{print_json, text_or_stdin};
use crate::output_by_format;
use hatecheck_core::error::{HatecheckError, Result};
use hatecheck_core::text::{PipelineTrace, Preprocessor};

pub fn execute(ctx: &CommandContext, text: Option<&str>, stages: bool) -> Result<()> {
    let text = text_or_stdin(text)?;
    let preprocessor = preprocessor_for(ctx)?;
    let cli = ctx.cli;

    if stages {
        let trace = preprocessor.trace(&text);
        return output_by_format!(cli.format,
            json => print_json(&trace),
            human => { print_stages(cli, &trace); }
        );
    }

    let output = preprocessor.preprocess_main(&text);
    output_by_format!(cli.format,
        json => print_json(&serde_json::json!({ "preprocessed": output })),
        human => {
            println!("{}", output);
        }
    )
}

fn preprocessor_for(ctx: &CommandContext) -> Result<Preprocessor> {
    match ctx.discover_or_open_store() {
        Ok(store) => store.preprocessor(),
        // An explicit --store must exist; discovery may come up empty
        Err(HatecheckError::StoreNotFound { .. }) if ctx.cli.store.is_none() => {
            tracing::debug!("No store found, using built-in stopwords");
            Preprocessor::builtin()
        }
        Err(e) => Err(e),
    }
}

fn print_stages(cli: &Cli, trace: &PipelineTrace) {
    if !cli.quiet {
        println!("raw:        {}", trace.raw);
    }
    println!("normalized: {}", trace.normalized);
    println!("tokens:     {}", trace.tokens.join(" | "));
    println!("collapsed:  {}", trace.collapsed.join(" | "));
    println!("filtered:   {}", trace.filtered.join(" | "));
    println!("output:     {}", trace.output);
}
