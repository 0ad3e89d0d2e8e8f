//! Format output dispatch helpers

/// Dispatch output by format. The json branch returns `Result`, the human
/// branch returns `()`.
///
/// ```rust,ignore
/// output_by_format!(cli.format,
///     json => print_json(&value),
///     human => { println!("{}", value.message); }
/// )?;
/// ```
#[macro_export]
macro_rules! output_by_format {
    ($format:expr, json => $json:expr, human => $human:block) => {
        match $format {
            $crate::cli::OutputFormat::Json => $json,
            $crate::cli::OutputFormat::Human => {
                $human;
                Ok(())
            }
        }
    };
}
