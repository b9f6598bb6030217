//! Field-level quoting
//!
//! A field is quoted if and only if it contains the quote character, the
//! delimiter, or the line break marker. Inside a quoted field every quote is
//! doubled. Nothing else is escaped.

use std::borrow::Cow;
use std::fmt::{self, Write};

/// Check whether `value` has to be wrapped in quotes
///
/// All three conditions are checked independently on the whole value.
#[must_use]
pub fn needs_quoting(value: &str, quote: char, delimiter: char, line_break: &str) -> bool {
    let contains_quote = value.contains(quote);
    let contains_delimiter = value.contains(delimiter);
    let contains_line_break = !line_break.is_empty() && value.contains(line_break);
    contains_quote || contains_delimiter || contains_line_break
}

/// Append the encoded form of `value` to `dst`
pub fn write_escaped<W: Write + ?Sized>(
    dst: &mut W,
    value: &str,
    quote: char,
    delimiter: char,
    line_break: &str,
) -> fmt::Result {
    if !needs_quoting(value, quote, delimiter, line_break) {
        return dst.write_str(value);
    }

    dst.write_char(quote)?;
    let mut rest = value;
    while let Some(pos) = rest.find(quote) {
        let end = pos + quote.len_utf8();
        dst.write_str(&rest[..end])?;
        dst.write_char(quote)?;
        rest = &rest[end..];
    }
    dst.write_str(rest)?;
    dst.write_char(quote)
}

/// Encode a single field value
///
/// Returns the input unchanged (borrowed) when no quoting is needed.
///
/// # Examples
///
/// ```
/// use csv_codec::escape_field;
///
/// assert_eq!(escape_field("plain", '"', ',', "\r\n"), "plain");
/// assert_eq!(escape_field("a,b", '"', ',', "\r\n"), "\"a,b\"");
/// assert_eq!(escape_field("say \"hi\"", '"', ',', "\r\n"), "\"say \"\"hi\"\"\"");
/// ```
#[must_use]
pub fn escape_field<'a>(
    value: &'a str,
    quote: char,
    delimiter: char,
    line_break: &str,
) -> Cow<'a, str> {
    if !needs_quoting(value, quote, delimiter, line_break) {
        return Cow::Borrowed(value);
    }

    let quotes = value.matches(quote).count();
    let mut out = String::with_capacity(value.len() + (quotes + 2) * quote.len_utf8());
    // Writing into a String cannot fail
    let _ = write_escaped(&mut out, value, quote, delimiter, line_break);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CRLF: &str = "\r\n";

    #[test]
    fn test_plain_values_pass_through() {
        for value in ["", "abc", "with space", "tab\there", "bell\u{7}", "lone\rcr"] {
            assert!(matches!(
                escape_field(value, '"', ',', CRLF),
                Cow::Borrowed(v) if v == value
            ));
        }
    }

    #[test]
    fn test_delimiter_forces_quotes() {
        assert_eq!(escape_field("a,b,c", '"', ',', CRLF), "\"a,b,c\"");
        // Only the configured delimiter counts
        assert_eq!(escape_field("a;b", '"', ',', CRLF), "a;b");
        assert_eq!(escape_field("a;b", '"', ';', CRLF), "\"a;b\"");
    }

    #[test]
    fn test_line_break_marker_forces_quotes() {
        assert_eq!(
            escape_field("line1\r\nline2", '"', ',', CRLF),
            "\"line1\r\nline2\""
        );
        // Substring containment of the marker, not of its characters
        assert_eq!(escape_field("only\nlf", '"', ',', CRLF), "only\nlf");
        assert_eq!(escape_field("only\nlf", '"', ',', "\n"), "\"only\nlf\"");
    }

    #[test]
    fn test_quotes_are_doubled() {
        assert_eq!(escape_field("\"", '"', ',', CRLF), "\"\"\"\"");
        assert_eq!(
            escape_field("a \"tall\" building", '"', ',', CRLF),
            "\"a \"\"tall\"\" building\""
        );
        assert_eq!(escape_field("c'd", '\'', ';', CRLF), "'c''d'");
    }

    #[test]
    fn test_all_conditions_combined() {
        assert_eq!(
            escape_field("1, \"2\"\r\n3", '"', ',', CRLF),
            "\"1, \"\"2\"\"\r\n3\""
        );
    }

    #[test]
    fn test_multibyte_quote() {
        assert_eq!(escape_field("a«b", '«', ',', CRLF), "«a««b«");
    }

    #[test]
    fn test_write_escaped_appends() {
        let mut out = String::from("x=");
        write_escaped(&mut out, "a,b", '"', ',', CRLF).unwrap_or_default();
        assert_eq!(out, "x=\"a,b\"");
    }
}
