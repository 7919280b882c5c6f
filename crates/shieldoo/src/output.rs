//! Output formatting: raw, JSON, YAML.
//!
//! API responses are printed as received by default. The structured formats
//! re-parse the body; anything that is not JSON is printed unchanged.

use std::io::{self, Write};

use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Render an API response body in the chosen format.
pub fn render(format: OutputFormat, body: &str) -> Result<String, CliError> {
    if format == OutputFormat::Raw {
        return Ok(body.to_owned());
    }
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Ok(body.to_owned());
    };

    match format {
        OutputFormat::Raw => Ok(body.to_owned()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&value)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&value)?.trim_end().to_owned()),
    }
}

/// Print the rendered output to stdout.
pub fn print_output(output: &str) {
    if output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Render `body` and print it.
pub fn print_response(format: OutputFormat, body: &str) -> Result<(), CliError> {
    print_output(&render(format, body)?);
    Ok(())
}
