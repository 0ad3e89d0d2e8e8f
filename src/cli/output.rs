//! Output format handling for hatecheck
//!
//! - human: readable, concise output for terminal use
//! - json: stable, machine-readable JSON

use clap::builder::PossibleValue;
use clap::ValueEnum;

/// Output format for hatecheck commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
}

impl ValueEnum for OutputFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[OutputFormat::Human, OutputFormat::Json]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            OutputFormat::Human => Some(PossibleValue::new("human")),
            OutputFormat::Json => Some(PossibleValue::new("json")),
        }
    }
}
