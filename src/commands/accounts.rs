//! Account commands: `register`, `token`, `request-count`

use crate::cli::Cli;
use crate::commands::output::print_json;
use crate::output_by_format;
use hatecheck_core::error::Result;
use hatecheck_core::store::Store;

pub fn register(cli: &Cli, store: Store, username: &str, email: &str, password: &str) -> Result<()> {
    let service = store.into_service()?;
    let user = service.register(username, email, password)?;

    output_by_format!(cli.format,
        json => print_json(&user),
        human => {
            if !cli.quiet {
                println!("Registered user {}", user.username);
            }
        }
    )
}

/// Print a bearer token for the user
pub fn token(cli: &Cli, store: Store, username: &str, password: &str) -> Result<()> {
    let service = store.into_service()?;
    let token = service.issue_token(username, password)?;

    output_by_format!(cli.format,
        json => print_json(&token),
        human => {
            // Bare token so it can be captured with $(hatecheck token ...)
            println!("{}", token.access_token);
        }
    )
}

pub fn request_count(cli: &Cli, store: Store, username: &str) -> Result<()> {
    let service = store.into_service()?;
    let count = service.request_count(username)?;

    output_by_format!(cli.format,
        json => print_json(&count),
        human => {
            if cli.quiet {
                println!("{}", count.request_count);
            } else {
                println!("{}: {} requests", count.username, count.request_count);
            }
        }
    )
}
