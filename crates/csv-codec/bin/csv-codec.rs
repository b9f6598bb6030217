//! csv-codec binary entry point.
//!
//! Thin wrapper around the csv-codec library that:
//! 1. Parses command-line arguments
//! 2. Initializes logging
//! 3. Runs the requested subcommand

use anyhow::{Context, Result};
use clap::Parser;
use csv_codec::cli::{Cli, Command, InputArgs, OutputArgs, TableStats};
use csv_codec::{CsvReader, CsvWriter, Table, read_from_file, write_to_file};
use std::io::Write;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Command::Convert { input, output } => convert(input, output),
        Command::Check { input } => check(input),
        Command::Stats { input } => stats(input),
    }
}

fn read_input(input: &InputArgs, strict: bool) -> Result<Table> {
    let mut options = input.read_options()?;
    if strict {
        options = options.strict();
    }

    let table = if input.is_stdin() {
        CsvReader::new(std::io::stdin().lock(), options).read_table()?
    } else {
        read_from_file(&input.path, &options)
            .with_context(|| format!("failed to read {}", input.path.display()))?
    };
    Ok(table)
}

fn convert(input: &InputArgs, output: &OutputArgs) -> Result<ExitCode> {
    let table = read_input(input, false)?;
    let options = output.write_options(input)?;

    if let Some(path) = &output.output {
        write_to_file(path, &table, &options, output.append)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("Wrote {} rows to {}", table.len(), path.display());
    } else {
        let mut writer = CsvWriter::new(std::io::stdout().lock(), options);
        writer.write_rows(&table)?;
        writer.finish()?.flush()?;
    }

    Ok(ExitCode::SUCCESS)
}

fn check(input: &InputArgs) -> Result<ExitCode> {
    match read_input(input, true) {
        Ok(table) => {
            let stats = TableStats::from_table(&table);
            println!("ok: {} rows", stats.rows);
            if !stats.is_rectangular() {
                tracing::warn!(
                    "Rows have between {} and {} fields",
                    stats.min_columns,
                    stats.max_columns
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            if let Some(csv_error) = e.downcast_ref::<csv_codec::CsvError>()
                && csv_error.is_syntax()
            {
                println!("invalid: {csv_error}");
                return Ok(ExitCode::FAILURE);
            }
            Err(e)
        }
    }
}

fn stats(input: &InputArgs) -> Result<ExitCode> {
    let table = read_input(input, false)?;
    let stats = TableStats::from_table(&table);

    println!("rows:        {}", stats.rows);
    println!("fields:      {}", stats.fields);
    println!("min columns: {}", stats.min_columns);
    println!("max columns: {}", stats.max_columns);

    Ok(ExitCode::SUCCESS)
}
