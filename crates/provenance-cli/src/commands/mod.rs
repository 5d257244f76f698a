//! Command implementations.

pub mod check;
pub mod config;
pub mod parse;
pub mod rebuild;

pub use self::check::execute_check;
pub use self::config::execute_config;
pub use self::parse::execute_parse;
pub use self::rebuild::execute_rebuild;

use crate::cli::InputArgs;
use crate::error::{CliError, Result};
use std::fs;
use std::io::{self, Read};

/// Read command input from the inline argument, a file, or stdin.
pub(crate) fn read_input(args: InputArgs) -> Result<String> {
    if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else if let Some(file_path) = args.file {
        Ok(fs::read_to_string(file_path)?)
    } else if let Some(text) = args.text {
        Ok(text)
    } else {
        Err(CliError::InvalidInput(
            "Must give text, --file or --stdin".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_inline_text() {
        let args = InputArgs {
            text: Some("John Smith".to_string()),
            file: None,
            stdin: false,
        };
        assert_eq!(read_input(args).unwrap(), "John Smith");
    }

    #[test]
    fn test_file_wins_over_text() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Jane Doe, London").unwrap();
        let args = InputArgs {
            text: Some("John Smith".to_string()),
            file: Some(file.path().to_string_lossy().into_owned()),
            stdin: false,
        };
        assert_eq!(read_input(args).unwrap(), "Jane Doe, London");
    }

    #[test]
    fn test_missing_input() {
        let args = InputArgs {
            text: None,
            file: None,
            stdin: false,
        };
        assert!(matches!(read_input(args), Err(CliError::InvalidInput(_))));
    }
}
