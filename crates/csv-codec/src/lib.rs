//! # csv-codec
//!
//! Encoder and decoder for CSV (Comma Separated Values) text following the
//! quoting rules of RFC 4180, with configurable quote and delimiter
//! characters.
//!
//! ## Format
//!
//! - Fields are separated by the delimiter (default `,`).
//! - Rows are separated by CRLF on output; CRLF or a bare LF is accepted on
//!   input in lenient mode.
//! - A field is quoted when it contains the quote character (default `"`),
//!   the delimiter, or a line feed. Quotes inside a quoted field are doubled.
//!
//! ## Quick Start
//!
//! ```rust
//! use csv_codec::{ReadOptions, WriteOptions, format_table, parse};
//!
//! let rows = vec![
//!     vec!["name", "description", "price"],
//!     vec!["skyscraper", "a \"tall\" building", "123.95"],
//! ];
//!
//! let text = format_table(&rows, &WriteOptions::default());
//! assert_eq!(
//!     text,
//!     "name,description,price\r\nskyscraper,\"a \"\"tall\"\" building\",123.95\r\n"
//! );
//!
//! let decoded = parse(&text, &ReadOptions::default())?;
//! assert_eq!(decoded, rows);
//! # Ok::<(), csv_codec::CsvError>(())
//! ```
//!
//! ## Absent values
//!
//! `None` fields are written as the configured null string. Decoding never
//! produces `None`, so the null string is what comes back.
//!
//! ```rust
//! use csv_codec::{WriteOptions, format_row};
//!
//! let options = WriteOptions::default().with_null_string("N/A");
//! assert_eq!(format_row([Some("a"), None], &options), "a,N/A");
//! ```
//!
//! ## Strict parsing
//!
//! ```rust
//! use csv_codec::{CsvError, ReadOptions, parse};
//!
//! // Lenient mode keeps whatever an unterminated quote accumulated
//! let table = parse("a,\"open", &ReadOptions::default())?;
//! assert_eq!(table, vec![vec!["a", "open"]]);
//!
//! let strict = ReadOptions::default().strict();
//! assert!(matches!(
//!     parse("a,\"open", &strict),
//!     Err(CsvError::UnterminatedQuote { line: 1, column: 3 })
//! ));
//! # Ok::<(), csv_codec::CsvError>(())
//! ```

#![warn(missing_docs)]

pub mod cli;
pub mod decoder;
pub mod dialect;
pub mod error;
pub mod escape;
pub mod reader;
pub mod source;
pub mod writer;

pub use decoder::{FieldEnd, decode_field};
pub use dialect::{
    DEFAULT_DELIMITER, DEFAULT_QUOTE, Dialect, LINE_TERMINATOR, ParseMode, ReadOptions,
    SIMPLE_WHITESPACE, WriteOptions,
};
pub use error::{CsvError, Result};
pub use escape::{escape_field, needs_quoting, write_escaped};
pub use reader::{CsvReader, Records, Row, Table, parse, read_from_file, read_row, read_table};
pub use source::{CharSource, Position, StrSource};
pub use writer::{
    AsField, CsvWriter, format_row, format_table, write_row, write_table, write_to_file,
};
