//! `hatecheck predict` command - classify text for an authenticated user

use crate::cli::Cli;
use crate::commands::output::{print_json, text_or_stdin};
use crate::output_by_format;
use hatecheck_core::error::Result;
use hatecheck_core::store::Store;

/// Execute the predict command
pub fn execute(cli: &Cli, store: Store, token: &str, text: Option<&str>) -> Result<()> {
    let text = text_or_stdin(text)?;

    let models = store.load_models();
    let service = store.into_service()?;

    // A bad token is reported ahead of any model problem
    let user = service.authenticate(token)?;
    let (embedder, classifier) = models?;

    let prediction = service
        .with_models(embedder, classifier)
        .predict_for(&user, &text)?;

    output_by_format!(cli.format,
        json => print_json(&prediction),
        human => {
            println!("{}", prediction.prediction);
        }
    )
}
