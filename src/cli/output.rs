//! Output formatting utilities for CLI

use serde::Serialize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print a serializable value as JSON or use custom text formatter
pub fn print_formatted<T, F>(value: &T, format: OutputFormat, text_formatter: F)
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Text => println!("{}", text_formatter(value)),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a success message (suppressed in quiet mode)
pub fn print_success(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message);
    }
}

/// Print an error message (never suppressed)
pub fn print_error(message: &str) {
    eprintln!("Error: {}", message);
}

#[derive(Serialize)]
struct SubmitReport<'a> {
    id: Option<&'a str>,
    message: &'a str,
}

/// Print the server's reply to an add or update.
///
/// Text mode prints the message alone and honours `quiet`; JSON mode always
/// prints `{ id, message }` so scripts can pick up the result.
pub fn print_submit_result(id: Option<&str>, message: &str, format: OutputFormat, quiet: bool) {
    match format {
        OutputFormat::Json => {
            print_formatted(&SubmitReport { id, message }, format, |r| r.message.to_string())
        }
        OutputFormat::Text => print_success(message, quiet),
    }
}

/// Render an optional text value for tables
pub fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}
