//! Row and table encoding

use crate::dialect::{LINE_TERMINATOR, WriteOptions};
use crate::escape::write_escaped;
use std::borrow::Cow;
use std::fmt;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, trace};

/// A value that can be written as a CSV field
///
/// `None` stands for an absent value and is replaced by the configured
/// null string before escaping.
pub trait AsField {
    /// Borrow the field text, or `None` for an absent value
    fn as_field(&self) -> Option<&str>;
}

impl AsField for str {
    fn as_field(&self) -> Option<&str> {
        Some(self)
    }
}

impl AsField for String {
    fn as_field(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl AsField for Cow<'_, str> {
    fn as_field(&self) -> Option<&str> {
        Some(self.as_ref())
    }
}

impl<T: AsRef<str>> AsField for Option<T> {
    fn as_field(&self) -> Option<&str> {
        self.as_ref().map(AsRef::as_ref)
    }
}

impl<T: AsField + ?Sized> AsField for &T {
    fn as_field(&self) -> Option<&str> {
        (**self).as_field()
    }
}

/// Any line feed, bare or inside CRLF, forces quoting
const LINE_BREAK_MARKER: &str = "\n";

/// Append one row's fields, delimiter separated, without a terminator
pub fn write_row<W, I>(dst: &mut W, fields: I, options: &WriteOptions) -> fmt::Result
where
    W: fmt::Write + ?Sized,
    I: IntoIterator,
    I::Item: AsField,
{
    write_fields(dst, fields, options).map(|_| ())
}

/// Write a row and report whether it was a single empty field
///
/// Such a row is indistinguishable from end of input unless a terminator
/// or an explicit `""` follows it.
fn write_fields<W, I>(dst: &mut W, fields: I, options: &WriteOptions) -> Result<bool, fmt::Error>
where
    W: fmt::Write + ?Sized,
    I: IntoIterator,
    I::Item: AsField,
{
    let dialect = options.dialect();
    let mut count = 0usize;
    let mut first_empty = false;
    for field in fields {
        if count > 0 {
            dst.write_char(dialect.delimiter())?;
        }
        let value = field.as_field().unwrap_or_else(|| options.null_string());
        if count == 0 {
            first_empty = value.is_empty();
        }
        write_escaped(
            dst,
            value,
            dialect.quote(),
            dialect.delimiter(),
            LINE_BREAK_MARKER,
        )?;
        count += 1;
    }
    Ok(count == 1 && first_empty)
}

fn write_empty_quoted<W: fmt::Write + ?Sized>(dst: &mut W, options: &WriteOptions) -> fmt::Result {
    let quote = options.dialect().quote();
    dst.write_char(quote)?;
    dst.write_char(quote)
}

/// Append a whole table: rows separated by CRLF, plus a final CRLF when
/// [`WriteOptions::trailing_newline`] is set and at least one row was written
///
/// Without the final CRLF a last row holding one empty field is written as
/// an empty quoted field so that it still decodes.
pub fn write_table<W, R>(dst: &mut W, rows: R, options: &WriteOptions) -> fmt::Result
where
    W: fmt::Write + ?Sized,
    R: IntoIterator,
    R::Item: IntoIterator,
    <R::Item as IntoIterator>::Item: AsField,
{
    let mut row_count = 0usize;
    let mut last_lone_empty = false;
    for row in rows {
        if row_count > 0 {
            dst.write_str(LINE_TERMINATOR)?;
        }
        last_lone_empty = write_fields(dst, row, options)?;
        row_count += 1;
    }
    if row_count == 0 {
        return Ok(());
    }
    if options.trailing_newline() {
        dst.write_str(LINE_TERMINATOR)?;
    } else if last_lone_empty {
        write_empty_quoted(dst, options)?;
    }
    Ok(())
}

/// Encode a table into a new string
///
/// # Examples
///
/// ```
/// use csv_codec::{WriteOptions, format_table};
///
/// let rows = vec![vec!["name", "note"], vec!["sub", "an aquatic, vehicle"]];
/// let csv = format_table(&rows, &WriteOptions::default());
/// assert_eq!(csv, "name,note\r\nsub,\"an aquatic, vehicle\"\r\n");
/// ```
#[must_use]
pub fn format_table<R>(rows: R, options: &WriteOptions) -> String
where
    R: IntoIterator,
    R::Item: IntoIterator,
    <R::Item as IntoIterator>::Item: AsField,
{
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_table(&mut out, rows, options);
    out
}

/// Encode a single record with no terminator, e.g. for a log line
#[must_use]
pub fn format_row<I>(fields: I, options: &WriteOptions) -> String
where
    I: IntoIterator,
    I::Item: AsField,
{
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_row(&mut out, fields, options);
    out
}

/// Incremental CSV writer over any [`Write`] sink
///
/// Rows are written in order as they arrive. A failing sink aborts the call;
/// bytes already handed to the sink are not rolled back.
pub struct CsvWriter<W: Write> {
    writer: BufWriter<W>,
    options: WriteOptions,
    buffer: String,
    rows_written: usize,
    last_lone_empty: bool,
}

impl<W: Write> CsvWriter<W> {
    /// Create a new writer
    pub fn new(writer: W, options: WriteOptions) -> Self {
        Self {
            writer: BufWriter::new(writer),
            options,
            buffer: String::new(),
            rows_written: 0,
            last_lone_empty: false,
        }
    }

    /// Write one row, preceded by a CRLF unless it is the first
    pub fn write_row<I>(&mut self, fields: I) -> Result<(), std::io::Error>
    where
        I: IntoIterator,
        I::Item: AsField,
    {
        self.buffer.clear();
        if self.rows_written > 0 {
            self.buffer.push_str(LINE_TERMINATOR);
        }
        // Writing into a String cannot fail
        self.last_lone_empty =
            write_fields(&mut self.buffer, fields, &self.options).unwrap_or_default();
        self.writer.write_all(self.buffer.as_bytes())?;
        self.rows_written += 1;
        trace!(row = self.rows_written, bytes = self.buffer.len(), "wrote CSV row");
        Ok(())
    }

    /// Write every row of `rows`
    pub fn write_rows<R>(&mut self, rows: R) -> Result<(), std::io::Error>
    where
        R: IntoIterator,
        R::Item: IntoIterator,
        <R::Item as IntoIterator>::Item: AsField,
    {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    /// Number of rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Emit the trailing newline if configured, flush, and return the sink
    pub fn finish(mut self) -> Result<W, std::io::Error> {
        if self.rows_written > 0 {
            if self.options.trailing_newline() {
                self.writer.write_all(LINE_TERMINATOR.as_bytes())?;
            } else if self.last_lone_empty {
                self.buffer.clear();
                // Writing into a String cannot fail
                let _ = write_empty_quoted(&mut self.buffer, &self.options);
                self.writer.write_all(self.buffer.as_bytes())?;
            }
        }
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(std::io::IntoInnerError::into_error)
    }
}

/// Write a table to a file as UTF-8, truncating it or appending to it
pub fn write_to_file<P, R>(
    path: P,
    rows: R,
    options: &WriteOptions,
    append: bool,
) -> Result<(), std::io::Error>
where
    P: AsRef<Path>,
    R: IntoIterator,
    R::Item: IntoIterator,
    <R::Item as IntoIterator>::Item: AsField,
{
    let path = path.as_ref();
    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)?;

    let mut writer = CsvWriter::new(file, options.clone());
    writer.write_rows(rows)?;
    let rows_written = writer.rows_written();
    writer.finish()?;

    debug!(path = %path.display(), rows = rows_written, append, "wrote CSV file");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    fn rows() -> Vec<Vec<&'static str>> {
        vec![vec!["a", "b"], vec!["c,d", "e"]]
    }

    #[test]
    fn test_format_table_with_trailing_newline() {
        let output = format_table(rows(), &WriteOptions::default());
        assert_eq!(output, "a,b\r\n\"c,d\",e\r\n");
    }

    #[test]
    fn test_format_table_without_trailing_newline() {
        let options = WriteOptions::default().with_trailing_newline(false);
        let output = format_table(rows(), &options);
        assert_eq!(output, "a,b\r\n\"c,d\",e");
        assert!(!output.ends_with("\r\n"));
    }

    #[test]
    fn test_empty_table_has_no_terminator() {
        let empty: Vec<Vec<String>> = Vec::new();
        assert_eq!(format_table(&empty, &WriteOptions::default()), "");
    }

    #[test]
    fn test_null_substitution() {
        let row = vec![Some("a"), None, Some("c")];
        let options = WriteOptions::default().with_null_string("N/A");
        assert_eq!(format_row(&row, &options), "a,N/A,c");

        // Null string is escaped like any other value
        let options = WriteOptions::default().with_null_string("nil,null");
        assert_eq!(format_row(&row, &options), "a,\"nil,null\",c");
    }

    #[test]
    fn test_empty_fields_and_rows() {
        let table = vec![vec!["a", "", "c"], vec![], vec![""]];
        let output = format_table(&table, &WriteOptions::default());
        assert_eq!(output, "a,,c\r\n\r\n\r\n");
    }

    #[test]
    fn test_bare_line_feed_is_quoted() {
        let output = format_table([["a\nb", "c"]], &WriteOptions::default());
        assert_eq!(output, "\"a\nb\",c\r\n");
        assert_eq!(
            format_row(["x\r\ny", "z\n"], &WriteOptions::default()),
            "\"x\r\ny\",\"z\n\""
        );
    }

    #[test]
    fn test_final_lone_empty_field_without_trailing_newline() {
        let options = WriteOptions::default().with_trailing_newline(false);
        assert_eq!(format_table([vec!["a"], vec![""]], &options), "a\r\n\"\"");
        assert_eq!(format_table([[""]], &options), "\"\"");
        // Only the last row needs the explicit quotes
        assert_eq!(format_table([[""], ["b"]], &options), "\r\nb");
        assert_eq!(format_table([[None::<&str>]], &options), "\"\"");

        let options = WriteOptions::default();
        assert_eq!(format_table([vec!["a"], vec![""]], &options), "a\r\n\r\n");
    }

    #[test]
    fn test_writer_final_lone_empty_field() {
        let mut writer = CsvWriter::new(
            Vec::new(),
            WriteOptions::default().with_trailing_newline(false),
        );
        writer.write_row([""]).expect("write empty row");
        writer.write_row(["a"]).expect("write row");
        writer.write_row([""]).expect("write empty row");
        let bytes = writer.finish().expect("finish");
        assert_eq!(String::from_utf8(bytes).unwrap(), "\r\na\r\n\"\"");
    }

    #[test]
    fn test_custom_dialect() {
        let options = WriteOptions::new(Dialect::new('\'', ';').unwrap());
        let output = format_row(["a;b", "c'd", "e,f"], &options);
        assert_eq!(output, "'a;b';'c''d';e,f");
    }

    #[test]
    fn test_writer_to_vec() {
        let mut buffer = Vec::new();
        {
            let mut writer = CsvWriter::new(&mut buffer, WriteOptions::default());
            writer.write_row(["x", "y"]).expect("write first row");
            writer
                .write_row(vec![String::from("line1\r\nline2")])
                .expect("write second row");
            assert_eq!(writer.rows_written(), 2);
            writer.finish().expect("finish");
        }

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert_eq!(output, "x,y\r\n\"line1\r\nline2\"\r\n");
    }

    #[test]
    fn test_writer_matches_format_table() {
        let mut writer = CsvWriter::new(
            Vec::new(),
            WriteOptions::default().with_trailing_newline(false),
        );
        writer.write_rows(rows()).expect("write rows");
        let bytes = writer.finish().expect("finish");

        let expected = format_table(rows(), &WriteOptions::default().with_trailing_newline(false));
        assert_eq!(String::from_utf8(bytes).unwrap(), expected);
    }

    #[test]
    fn test_writer_without_rows_writes_nothing() {
        let writer = CsvWriter::new(Vec::new(), WriteOptions::default());
        assert!(writer.finish().unwrap().is_empty());
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("disk full"))
        }
    }

    #[test]
    fn test_writer_propagates_sink_failure() {
        let mut writer = CsvWriter::new(FailingSink, WriteOptions::default());
        // Small rows sit in the BufWriter, so the failure shows up on finish
        writer.write_row(["a"]).expect("buffered");
        let error = writer.finish().err().expect("sink failure");
        assert_eq!(error.to_string(), "disk full");
    }
}
