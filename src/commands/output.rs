//! Shared output and input helpers for commands

use std::io::{self, IsTerminal, Read};

use serde::Serialize;

use hatecheck_core::error::{HatecheckError, Result};

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Use the positional text, or read all of stdin when it was omitted
pub fn text_or_stdin(text: Option<&str>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(HatecheckError::UsageError(
            "no text given; pass TEXT or pipe it on stdin".to_string(),
        ));
    }

    let mut content = String::new();
    stdin.lock().read_to_string(&mut content)?;
    tracing::debug!(content_len = content.len(), "read_stdin");

    // Drop the trailing newline left by `echo` and heredocs
    Ok(content.trim_end_matches(['\n', '\r']).to_string())
}
