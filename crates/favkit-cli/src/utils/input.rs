//! User input utilities for interactive command-line prompts.
//!
//! Terminal failures surface as [`CliError::Io`].

use anyhow::Result;
use std::io::{self, BufRead, Write};

use crate::error::CliError;

/// Prompts the user for a yes/no confirmation.
///
/// Returns `true` only for `y` or `yes` (case-insensitive).
pub fn prompt_confirmation(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N]: ");
    io::stdout().flush().map_err(CliError::from)?;

    read_confirmation(io::stdin().lock())
}

fn read_confirmation(mut reader: impl BufRead) -> Result<bool> {
    let mut input = String::new();
    reader.read_line(&mut input).map_err(CliError::from)?;

    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_confirmation() {
        assert!(read_confirmation("y\n".as_bytes()).unwrap());
        assert!(read_confirmation("YES\n".as_bytes()).unwrap());
        assert!(!read_confirmation("\n".as_bytes()).unwrap());
        assert!(!read_confirmation("nope\n".as_bytes()).unwrap());
    }

    #[test]
    fn test_unreadable_input_is_io_error() {
        let err = read_confirmation(&[0xff, 0xfe, b'\n'][..]).unwrap_err();
        let cli_err = err.downcast_ref::<CliError>().unwrap();
        assert!(matches!(cli_err, CliError::Io(_)));
        assert_eq!(cli_err.exit_code(), 74);
    }
}
