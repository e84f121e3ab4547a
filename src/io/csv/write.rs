//! CSV writing operations.

use std::path::Path;

use polars::{frame::DataFrame, io::SerWriter, prelude::CsvWriter};

use crate::{error::{Error, Result}, io::pending::PendingWrite};

use super::CsvOptions;

/// Write a DataFrame to a delimited file at `path`.
pub fn write_csv(path: &Path, df: &mut DataFrame, options: &CsvOptions) -> Result<()> {
    let mut sink = PendingWrite::open(path, true)?;
    CsvWriter::new(&mut sink)
        .include_header(options.has_header)
        .with_separator(options.separator)
        .finish(df)?;
    sink.finalize()
}

/// Write a DataFrame to a delimited string.
pub fn write_csv_string(df: &mut DataFrame, options: &CsvOptions) -> Result<String> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(options.has_header)
        .with_separator(options.separator)
        .finish(df)?;
    String::from_utf8(buffer)
        .map_err(|e| Error::parse("[io::csv::write] CSV output is not valid UTF-8", e))
}

#[cfg(test)]
mod tests {
    use polars::df;

    use super::*;
    use crate::io::csv::read_csv_str;

    #[test]
    fn string_round_trip_with_custom_separator() {
        let mut df = df!(
            "name" => ["Gädheim", "Paris"],
            "population" => [1_300i64, 2_100_000],
        ).unwrap();
        let options = CsvOptions::default().with_separator(b';');

        let text = write_csv_string(&mut df, &options).unwrap();
        assert!(text.starts_with("name;population"));

        let back = read_csv_str(&text, &options).unwrap();
        assert!(back.equals(&df));
    }
}
