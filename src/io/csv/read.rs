//! CSV reading operations.

use std::{fs::File, io::Cursor, path::Path};

use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReadOptions, CsvReader}};

use crate::error::{Error, IoContext, Result};

use super::CsvOptions;

fn read_options(options: &CsvOptions) -> CsvReadOptions {
    let separator = options.separator;
    CsvReadOptions::default()
        .with_has_header(options.has_header)
        .map_parse_options(|po| po.with_separator(separator))
}

/// Reads a delimited file from `path` into a Polars DataFrame.
pub fn read_csv(path: &Path, options: &CsvOptions) -> Result<DataFrame> {
    let file = File::open(path)
        .io_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    read_options(options)
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|e| Error::parse(format!("[io::csv::read] Failed to read CSV from {}", path.display()), e))
}

/// Reads delimited text held in memory.
pub fn read_csv_str(csv: &str, options: &CsvOptions) -> Result<DataFrame> {
    CsvReader::new(Cursor::new(csv.as_bytes()))
        .with_options(read_options(options))
        .finish()
        .map_err(|e| Error::parse("[io::csv::read] Failed to read CSV from string", e))
}
