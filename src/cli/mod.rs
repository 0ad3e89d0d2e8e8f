//! CLI argument parsing for hatecheck
//!
//! Supports global flags: --root, --store, --format, --quiet, --verbose

pub mod format;
pub mod output;
pub mod paths;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use output::OutputFormat;

/// Hatecheck - hate-speech detection for noisy Hinglish/English text
#[derive(Parser, Debug)]
#[command(name = "hatecheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for resolving the store
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit store root path
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new hatecheck store
    Init {
        /// Dimension of the sentence vectors fed to the classifier
        #[arg(long)]
        embedding_dim: Option<usize>,

        /// bcrypt cost for passwords registered in this store (4-31)
        #[arg(long)]
        password_cost: Option<u32>,
    },

    /// Register a new user
    Register {
        /// Username (must be unique)
        username: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Password
        #[arg(long, env = "HATECHECK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Exchange username and password for an access token
    Token {
        /// Username
        username: String,

        /// Password
        #[arg(long, env = "HATECHECK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Classify text (reads stdin when TEXT is omitted)
    Predict {
        /// Access token from `hatecheck token`
        #[arg(long, env = "HATECHECK_TOKEN", hide_env_values = true)]
        token: String,

        /// Text to classify
        text: Option<String>,
    },

    /// Show how many predictions a user has made
    RequestCount {
        /// Username
        username: String,
    },

    /// Run the preprocessing pipeline only (reads stdin when TEXT is omitted)
    Preprocess {
        /// Text to preprocess
        text: Option<String>,

        /// Show the output of every pipeline stage
        #[arg(long)]
        stages: bool,
    },
}
