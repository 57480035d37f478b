//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from input handling.

use std::io::{self, Write};

use console::style;
use serde_json::Value;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Render one result value: strings raw, everything else as compact JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Write one page's results, one value per line.
pub fn write_values<W: Write>(out: &mut W, values: &[Value]) -> io::Result<()> {
    for value in values {
        writeln!(out, "{}", format_value(value))?;
    }
    out.flush()
}
