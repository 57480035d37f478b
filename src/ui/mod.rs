//! User interface module - terminal input and output formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Reading piped input

use std::io::{self, IsTerminal, Read};

pub mod formatter;

pub use formatter::{display_error, format_value, write_values};

/// Reads all of stdin when it is piped or redirected.
///
/// # Returns
/// * `Ok(None)` - stdin is an interactive terminal and was not read
/// * `Ok(Some(text))` - everything that was piped in (possibly empty)
pub fn read_piped_stdin() -> io::Result<Option<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut input = Vec::new();
    stdin.lock().read_to_end(&mut input)?;
    Ok(Some(String::from_utf8_lossy(&input).into_owned()))
}
