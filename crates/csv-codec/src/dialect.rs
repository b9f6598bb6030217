//! Codec configuration: quote/delimiter pair and per-direction options

use crate::error::{CsvError, Result};

/// Default quote character (`"`)
pub const DEFAULT_QUOTE: char = '"';

/// Default field delimiter (`,`)
pub const DEFAULT_DELIMITER: char = ',';

/// Row separator written between rows and after the last row
pub const LINE_TERMINATOR: &str = "\r\n";

/// Space, tab and form feed. Never contains newline characters.
pub const SIMPLE_WHITESPACE: &[char] = &[' ', '\t', '\u{000C}'];

/// Quote and delimiter characters shared by the encoder and decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dialect {
    quote: char,
    delimiter: char,
}

impl Dialect {
    /// Create a dialect, rejecting pairs the decoder could not tell apart
    ///
    /// # Examples
    ///
    /// ```
    /// use csv_codec::Dialect;
    ///
    /// let dialect = Dialect::new('\'', ';')?;
    /// assert_eq!(dialect.quote(), '\'');
    /// assert!(Dialect::new(',', ',').is_err());
    /// # Ok::<(), csv_codec::CsvError>(())
    /// ```
    pub fn new(quote: char, delimiter: char) -> Result<Self> {
        if quote == delimiter {
            return Err(CsvError::InvalidDialect(format!(
                "quote and delimiter are both {quote:?}"
            )));
        }
        for (role, ch) in [("quote", quote), ("delimiter", delimiter)] {
            if is_newline(ch) {
                return Err(CsvError::InvalidDialect(format!(
                    "{role} cannot be a newline character ({ch:?})"
                )));
            }
        }
        Ok(Self { quote, delimiter })
    }

    /// Quote character
    #[must_use]
    pub const fn quote(&self) -> char {
        self.quote
    }

    /// Field delimiter
    #[must_use]
    pub const fn delimiter(&self) -> char {
        self.delimiter
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            quote: DEFAULT_QUOTE,
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

/// How the decoder treats input that deviates from RFC 4180
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ParseMode {
    /// Accept bare `\n` terminators, unterminated quotes and stray characters
    #[default]
    Lenient,
    /// Reject anything RFC 4180 does not allow
    Strict,
}

/// Decoder configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    dialect: Dialect,
    mode: ParseMode,
    leading_whitespace: Option<Vec<char>>,
}

impl ReadOptions {
    /// Lenient options for the given dialect without whitespace skipping
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    /// Set the parse mode
    #[must_use]
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for `with_mode(ParseMode::Strict)`
    #[must_use]
    pub fn strict(self) -> Self {
        self.with_mode(ParseMode::Strict)
    }

    /// Skip any of `whitespace` before each field (never inside quotes)
    ///
    /// The set may not overlap the quote, the delimiter or newline characters,
    /// otherwise skipping would swallow field boundaries.
    pub fn skip_leading_whitespace(mut self, whitespace: &[char]) -> Result<Self> {
        if let Some(&ch) = whitespace
            .iter()
            .find(|&&ch| ch == self.dialect.quote || ch == self.dialect.delimiter || is_newline(ch))
        {
            return Err(CsvError::InvalidDialect(format!(
                "leading whitespace set contains a structural character ({ch:?})"
            )));
        }
        self.leading_whitespace = Some(whitespace.to_vec());
        Ok(self)
    }

    /// Dialect in use
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Parse mode in use
    #[must_use]
    pub const fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Characters skipped before each field, if skipping is enabled
    #[must_use]
    pub fn leading_whitespace(&self) -> Option<&[char]> {
        self.leading_whitespace.as_deref()
    }

    pub(crate) fn is_strict(&self) -> bool {
        self.mode == ParseMode::Strict
    }
}

/// Encoder configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    dialect: Dialect,
    null_string: String,
    trailing_newline: bool,
}

impl WriteOptions {
    /// Options for the given dialect: empty null string, trailing newline on
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            null_string: String::new(),
            trailing_newline: true,
        }
    }

    /// Text written in place of absent (`None`) fields
    #[must_use]
    pub fn with_null_string(mut self, null_string: impl Into<String>) -> Self {
        self.null_string = null_string.into();
        self
    }

    /// Whether a CRLF follows the last row
    #[must_use]
    pub fn with_trailing_newline(mut self, trailing_newline: bool) -> Self {
        self.trailing_newline = trailing_newline;
        self
    }

    /// Dialect in use
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Replacement for absent fields
    #[must_use]
    pub fn null_string(&self) -> &str {
        &self.null_string
    }

    /// Whether a CRLF follows the last row
    #[must_use]
    pub const fn trailing_newline(&self) -> bool {
        self.trailing_newline
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

pub(crate) const fn is_newline(ch: char) -> bool {
    matches!(ch, '\r' | '\n')
}
