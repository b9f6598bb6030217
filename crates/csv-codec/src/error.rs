//! Error types for CSV encoding and decoding.
//!
//! Lenient decoding only ever fails with [`CsvError::Io`]. The positional
//! variants are produced by [`ParseMode::Strict`](crate::ParseMode::Strict).

use thiserror::Error;

/// Result type for CSV operations
pub type Result<T> = std::result::Result<T, CsvError>;

/// Errors that can occur while reading or writing CSV data
#[derive(Debug, Error)]
pub enum CsvError {
    /// Underlying source or sink failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Quote/delimiter/whitespace configuration cannot produce parseable output
    #[error("Invalid dialect: {0}")]
    InvalidDialect(String),

    /// Input ended inside a quoted field
    #[error("Unterminated quoted field starting at line {line}, column {column}")]
    UnterminatedQuote {
        /// Line of the opening quote
        line: usize,
        /// Column of the opening quote
        column: usize,
    },

    /// Row terminated by `\n` without a preceding `\r`
    #[error("Bare line feed at line {line}, column {column}")]
    BareLineFeed {
        /// Line of the line feed
        line: usize,
        /// Column of the line feed
        column: usize,
    },

    /// Quote character inside a field that did not start with one
    #[error("Unexpected quote in unquoted field at line {line}, column {column}")]
    UnexpectedQuote {
        /// Line of the quote
        line: usize,
        /// Column of the quote
        column: usize,
    },

    /// Something other than a delimiter or row terminator followed a closing quote
    #[error("Unexpected character {ch:?} after closing quote at line {line}, column {column}")]
    UnexpectedCharacter {
        /// The offending character
        ch: char,
        /// Line of the character
        line: usize,
        /// Column of the character
        column: usize,
    },
}

impl CsvError {
    /// Whether this error is a strict-mode syntax violation rather than an I/O
    /// or configuration failure
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(
            self,
            Self::UnterminatedQuote { .. }
                | Self::BareLineFeed { .. }
                | Self::UnexpectedQuote { .. }
                | Self::UnexpectedCharacter { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: CsvError = io_error.into();
        assert!(matches!(error, CsvError::Io(_)));
        assert!(error.to_string().contains("IO error"));
        assert!(!error.is_syntax());
    }

    #[test]
    fn test_positional_error_display() {
        let error = CsvError::UnexpectedCharacter {
            ch: 'x',
            line: 3,
            column: 7,
        };
        assert_eq!(
            error.to_string(),
            "Unexpected character 'x' after closing quote at line 3, column 7"
        );
        assert!(error.is_syntax());
    }

    #[test]
    fn test_invalid_dialect_display() {
        let error = CsvError::InvalidDialect("quote equals delimiter".to_string());
        assert_eq!(error.to_string(), "Invalid dialect: quote equals delimiter");
        assert!(!error.is_syntax());
    }
}
