//! Row and table decoding

use crate::decoder::{FieldEnd, decode_field};
use crate::dialect::ReadOptions;
use crate::error::{CsvError, Result};
use crate::source::{CharSource, Position, StrSource};
use std::io::Read;
use std::path::Path;
use tracing::{debug, trace};

/// One decoded record
pub type Row = Vec<String>;

/// Decoded records in input order
pub type Table = Vec<Row>;

/// Read the next row from `source`, or `None` once the input is exhausted
///
/// A row ends at CRLF, at a bare LF (lenient mode only), or at end of input.
/// A delimiter always announces another field, so `a,` yields `["a", ""]`.
pub fn read_row<S>(source: &mut S, options: &ReadOptions) -> Result<Option<Row>>
where
    S: CharSource + ?Sized,
{
    if !source.has_next() {
        return Ok(None);
    }

    let mut row = Row::new();
    let mut field = String::new();
    loop {
        let end = decode_field(source, options, &mut field)?;
        row.push(std::mem::take(&mut field));

        if end == FieldEnd::Delimiter {
            continue;
        }
        if consume_row_terminator(source, options)? || !source.has_next() {
            break;
        }
        // Lenient mode only: leftovers after a field continue the same row
    }

    trace!(fields = row.len(), "decoded CSV row");
    Ok(Some(row))
}

fn consume_row_terminator<S>(source: &mut S, options: &ReadOptions) -> Result<bool>
where
    S: CharSource + ?Sized,
{
    if source.next_if_str("\r\n") {
        return Ok(true);
    }
    if source.peek() != Some('\n') {
        return Ok(false);
    }
    if options.is_strict() {
        let Position { line, column } = source.position();
        return Err(CsvError::BareLineFeed { line, column });
    }
    source.next_char();
    Ok(true)
}

/// Decode every remaining row of `source`
pub fn read_table<S>(source: &mut S, options: &ReadOptions) -> Result<Table>
where
    S: CharSource + ?Sized,
{
    let mut table = Table::new();
    while let Some(row) = read_row(source, options)? {
        table.push(row);
    }
    debug!(rows = table.len(), "decoded CSV table");
    Ok(table)
}

/// Decode a table from a string
///
/// # Examples
///
/// ```
/// use csv_codec::{ReadOptions, parse};
///
/// let table = parse("name,note\r\nsub,\"an aquatic, vehicle\"\r\n", &ReadOptions::default())?;
/// assert_eq!(table, vec![vec!["name", "note"], vec!["sub", "an aquatic, vehicle"]]);
/// # Ok::<(), csv_codec::CsvError>(())
/// ```
pub fn parse(input: &str, options: &ReadOptions) -> Result<Table> {
    read_table(&mut StrSource::new(input), options)
}

/// Row-by-row iterator over a character source
///
/// The iterator stops after the first error.
#[derive(Debug)]
pub struct Records<'o, S> {
    source: S,
    options: &'o ReadOptions,
    failed: bool,
}

impl<'o, S: CharSource> Records<'o, S> {
    /// Iterate rows of `source`
    pub fn new(source: S, options: &'o ReadOptions) -> Self {
        Self {
            source,
            options,
            failed: false,
        }
    }

    /// Give back the underlying source, positioned after the last row read
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: CharSource> Iterator for Records<'_, S> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match read_row(&mut self.source, self.options) {
            Ok(row) => row.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// CSV reader over any [`Read`] source
///
/// The whole input is read into memory as UTF-8 before decoding.
pub struct CsvReader<R> {
    reader: R,
    options: ReadOptions,
}

impl<R: Read> CsvReader<R> {
    /// Create a new reader
    pub fn new(reader: R, options: ReadOptions) -> Self {
        Self { reader, options }
    }

    /// Read and decode the complete input
    pub fn read_table(&mut self) -> Result<Table> {
        let mut content = String::new();
        self.reader.read_to_string(&mut content)?;
        parse(&content, &self.options)
    }
}

impl<'a> CsvReader<&'a [u8]> {
    /// Create a reader from a byte slice
    #[must_use]
    pub fn from_bytes(bytes: &'a [u8], options: ReadOptions) -> Self {
        Self::new(bytes, options)
    }
}

impl CsvReader<std::fs::File> {
    /// Create a reader from a file path
    pub fn from_path<P: AsRef<Path>>(path: P, options: ReadOptions) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(Self::new(file, options))
    }
}

/// Read and decode a UTF-8 CSV file
pub fn read_from_file<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Table> {
    let path = path.as_ref();
    let table = CsvReader::from_path(path, options.clone())?.read_table()?;
    debug!(path = %path.display(), rows = table.len(), "read CSV file");
    Ok(table)
}
