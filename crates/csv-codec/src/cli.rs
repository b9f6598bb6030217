//! Command line configuration for the `csv-codec` binary.
//!
//! Dialect settings can be given as arguments or through environment
//! variables:
//! - `CSV_CODEC_DELIMITER` / `--delimiter`
//! - `CSV_CODEC_QUOTE` / `--quote`
//! - `CSV_CODEC_STRICT` / `--strict`
//!
//! # Example
//!
//! ```
//! use clap::Parser;
//! use csv_codec::cli::{Cli, Command};
//!
//! let cli = Cli::parse_from(["csv-codec", "stats", "--delimiter", ";", "data.csv"]);
//! let Command::Stats { input } = &cli.command else { unreachable!() };
//! assert_eq!(input.read_options().unwrap().dialect().delimiter(), ';');
//! ```

use crate::dialect::{
    DEFAULT_DELIMITER, DEFAULT_QUOTE, Dialect, ParseMode, ReadOptions, SIMPLE_WHITESPACE,
    WriteOptions,
};
use crate::error::Result;
use crate::reader::Table;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Encode, decode and validate CSV files
#[derive(Debug, Clone, Parser)]
#[command(name = "csv-codec", about = "RFC 4180 CSV conversion and validation", version)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Re-encode a CSV file, optionally into another dialect
    Convert {
        /// Input settings
        #[command(flatten)]
        input: InputArgs,

        /// Output settings
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Validate a CSV file in strict RFC 4180 mode
    Check {
        /// Input settings
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print row and column counts
    Stats {
        /// Input settings
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Where and how to read CSV input
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Input file, `-` for standard input
    pub path: PathBuf,

    /// Field delimiter of the input (`\t` or `tab` for tab)
    #[arg(long, env = "CSV_CODEC_DELIMITER", default_value_t = DEFAULT_DELIMITER, value_parser = parse_char)]
    pub delimiter: char,

    /// Quote character of the input
    #[arg(long, env = "CSV_CODEC_QUOTE", default_value_t = DEFAULT_QUOTE, value_parser = parse_char)]
    pub quote: char,

    /// Reject input that RFC 4180 does not allow
    #[arg(long, env = "CSV_CODEC_STRICT")]
    pub strict: bool,

    /// Skip spaces, tabs and form feeds before each field
    #[arg(long)]
    pub skip_leading_whitespace: bool,
}

impl InputArgs {
    /// Decoder options described by these arguments
    pub fn read_options(&self) -> Result<ReadOptions> {
        let mode = if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        };
        let options = ReadOptions::new(Dialect::new(self.quote, self.delimiter)?).with_mode(mode);
        if self.skip_leading_whitespace {
            options.skip_leading_whitespace(SIMPLE_WHITESPACE)
        } else {
            Ok(options)
        }
    }

    /// Whether input comes from standard input
    #[must_use]
    pub fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

/// Where and how to write CSV output
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output file (standard output when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Field delimiter of the output (defaults to the input delimiter)
    #[arg(long, value_parser = parse_char)]
    pub to_delimiter: Option<char>,

    /// Quote character of the output (defaults to the input quote)
    #[arg(long, value_parser = parse_char)]
    pub to_quote: Option<char>,

    /// Do not terminate the last row with CRLF
    #[arg(long)]
    pub no_trailing_newline: bool,

    /// Append to the output file instead of truncating it
    #[arg(long, requires = "output")]
    pub append: bool,
}

impl OutputArgs {
    /// Encoder options, falling back to the input dialect
    pub fn write_options(&self, input: &InputArgs) -> Result<WriteOptions> {
        let dialect = Dialect::new(
            self.to_quote.unwrap_or(input.quote),
            self.to_delimiter.unwrap_or(input.delimiter),
        )?;
        Ok(WriteOptions::new(dialect).with_trailing_newline(!self.no_trailing_newline))
    }
}

/// Row and column counts of a decoded table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    /// Number of rows
    pub rows: usize,
    /// Total number of fields
    pub fields: usize,
    /// Fewest fields in any row
    pub min_columns: usize,
    /// Most fields in any row
    pub max_columns: usize,
}

impl TableStats {
    /// Summarize `table`
    #[must_use]
    pub fn from_table(table: &Table) -> Self {
        let columns = table.iter().map(Vec::len);
        Self {
            rows: table.len(),
            fields: columns.clone().sum(),
            min_columns: columns.clone().min().unwrap_or(0),
            max_columns: columns.max().unwrap_or(0),
        }
    }

    /// Whether every row has the same number of fields
    #[must_use]
    pub const fn is_rectangular(&self) -> bool {
        self.min_columns == self.max_columns
    }
}

fn parse_char(value: &str) -> std::result::Result<char, String> {
    if value == "\\t" || value == "tab" {
        return Ok('\t');
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(format!("expected a single character, got {value:?}")),
    }
}
