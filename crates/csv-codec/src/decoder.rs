//! Single-field decoder
//!
//! Each call runs a small state machine over the character source:
//!
//! ```text
//! Start ──quote──▶ Quoted ──quote, not doubled──▶ End
//!   │                 ▲  │
//!   │                 └──┘ doubled quote / any other char
//!   └──otherwise──▶ Unquoted
//! ```
//!
//! `Unquoted` stops before the delimiter, the quote, or a row terminator.
//! After `Unquoted` or `End` a following delimiter is consumed. Row
//! terminators are left for the row reader.

use crate::dialect::ReadOptions;
use crate::error::{CsvError, Result};
use crate::source::{CharSource, Position};
use tracing::debug;

/// How a decoded field ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldEnd {
    /// A delimiter followed and was consumed, so another field follows in
    /// the same row
    Delimiter,
    /// Anything else: a row terminator, end of input, or (lenient mode only)
    /// stray characters. Nothing was consumed past the field.
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Unquoted,
    Quoted { opened_at: Position },
    End,
}

/// Decode one field from `source`, appending its value to `dst`
///
/// # Examples
///
/// ```
/// use csv_codec::{FieldEnd, ReadOptions, StrSource, decode_field};
///
/// let mut source = StrSource::new("\"a,\"\"b\"\"\",c");
/// let mut value = String::new();
/// let end = decode_field(&mut source, &ReadOptions::default(), &mut value)?;
/// assert_eq!(value, "a,\"b\"");
/// assert_eq!(end, FieldEnd::Delimiter);
/// assert_eq!(source.remaining(), "c");
/// # Ok::<(), csv_codec::CsvError>(())
/// ```
pub fn decode_field<S>(source: &mut S, options: &ReadOptions, dst: &mut String) -> Result<FieldEnd>
where
    S: CharSource + ?Sized,
{
    let quote = options.dialect().quote();
    let delimiter = options.dialect().delimiter();
    let unquoted_stops = [delimiter, quote, '\n', '\r'];
    let quoted_stops = [quote];

    let mut state = State::Start;
    loop {
        state = match state {
            State::Start => {
                if let Some(whitespace) = options.leading_whitespace() {
                    source.skip_any(whitespace);
                }
                let opened_at = source.position();
                if source.next_if(quote) {
                    State::Quoted { opened_at }
                } else {
                    State::Unquoted
                }
            }
            State::Unquoted => {
                source.read_until(&unquoted_stops, dst);
                match source.peek() {
                    // A lone CR is data; only CRLF terminates a row
                    Some('\r') if !source.starts_with("\r\n") => {
                        source.next_char();
                        dst.push('\r');
                        State::Unquoted
                    }
                    Some(ch) if ch == quote && options.is_strict() => {
                        let Position { line, column } = source.position();
                        return Err(CsvError::UnexpectedQuote { line, column });
                    }
                    _ => break,
                }
            }
            State::Quoted { opened_at } => {
                source.read_until(&quoted_stops, dst);
                if source.next_char().is_none() {
                    if options.is_strict() {
                        return Err(CsvError::UnterminatedQuote {
                            line: opened_at.line,
                            column: opened_at.column,
                        });
                    }
                    debug!(
                        line = opened_at.line,
                        column = opened_at.column,
                        "unterminated quoted field, keeping accumulated text"
                    );
                    break;
                }
                if source.next_if(quote) {
                    dst.push(quote);
                    State::Quoted { opened_at }
                } else {
                    State::End
                }
            }
            State::End => {
                check_after_closing_quote(source, options, delimiter)?;
                break;
            }
        };
    }

    if source.next_if(delimiter) {
        Ok(FieldEnd::Delimiter)
    } else {
        Ok(FieldEnd::Open)
    }
}

fn check_after_closing_quote<S>(source: &S, options: &ReadOptions, delimiter: char) -> Result<()>
where
    S: CharSource + ?Sized,
{
    let ch = match source.peek() {
        None | Some('\n') => return Ok(()),
        Some('\r') if source.starts_with("\r\n") => return Ok(()),
        Some(ch) if ch == delimiter => return Ok(()),
        Some(ch) => ch,
    };

    let Position { line, column } = source.position();
    if options.is_strict() {
        return Err(CsvError::UnexpectedCharacter { ch, line, column });
    }
    debug!(?ch, line, column, "stray character after closing quote starts a new field");
    Ok(())
}
