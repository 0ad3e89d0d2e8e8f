//! `hatecheck init` command - create a new store
//!
//! Idempotent: running it again keeps the existing config and users.

use std::path::Path;

use crate::cli::paths::resolve_store_path;
use crate::cli::Cli;
use crate::output_by_format;
use hatecheck_core::auth::PASSWORD_COST_RANGE;
use hatecheck_core::config::ServiceConfig;
use hatecheck_core::error::{HatecheckError, Result};
use hatecheck_core::store::paths::DEFAULT_STORE_DIR;
use hatecheck_core::store::Store;

/// Execute the init command
pub fn execute(
    cli: &Cli,
    root: &Path,
    embedding_dim: Option<usize>,
    password_cost: Option<u32>,
) -> Result<()> {
    let mut config = ServiceConfig::default();
    if let Some(dim) = embedding_dim {
        if dim == 0 {
            return Err(HatecheckError::invalid_value("--embedding-dim", dim));
        }
        config.model.embedding_dim = dim;
    }
    if let Some(cost) = password_cost {
        if !PASSWORD_COST_RANGE.contains(&cost) {
            return Err(HatecheckError::invalid_value("--password-cost", cost));
        }
        config.auth.password_cost = cost;
    }

    let path = match cli.store.as_ref() {
        Some(store) => resolve_store_path(root, store),
        None => root.join(DEFAULT_STORE_DIR),
    };

    let store = Store::init(&path, config)?;
    let classifier_path = store.config().classifier_path(store.root());

    output_by_format!(cli.format,
        json => {
            let output = serde_json::json!({
                "status": "ok",
                "store": store.root().display().to_string(),
                "embedding_dim": store.config().model.embedding_dim,
                "classifier_path": classifier_path.display().to_string(),
                "message": "Store initialized"
            });
            crate::commands::output::print_json(&output)
        },
        human => {
            println!("Initialized hatecheck store at {}", store.root().display());
            if !cli.quiet && !classifier_path.exists() {
                println!();
                println!(
                    "Place a classifier model at {} to enable predictions.",
                    classifier_path.display()
                );
            }
        }
    )
}
