//! JSON reading and writing, both as free-form values and as tabular records.

use std::{fs::File, io::{BufReader, Cursor}, path::Path};

use polars::{frame::DataFrame, io::{json::{JsonFormat, JsonReader}, SerReader, SerWriter}, prelude::JsonWriter};
use serde_json::Value;

use crate::error::{Error, IoContext, Result};

use super::pending::{write_atomic, PendingWrite};

/// Reads a JSON document from `path`.
pub fn read_json(path: &Path) -> Result<Value> {
    let file = File::open(path)
        .io_context(|| format!("[io::json::read] Failed to read JSON file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| Error::parse(format!("[io::json::read] Invalid JSON in {}", path.display()), e))
}

/// Writes `value` as a JSON document to `path`.
pub fn write_json(path: &Path, value: &Value, pretty: bool) -> Result<()> {
    let bytes = if pretty { serde_json::to_vec_pretty(value)? } else { serde_json::to_vec(value)? };
    write_atomic(path, &bytes)
}

/// Reads newline-delimited JSON records from `path` into a DataFrame.
pub fn read_json_records(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .io_context(|| format!("[io::json::read] Failed to read JSON file: {}", path.display()))?;
    JsonReader::new(BufReader::new(file))
        .with_json_format(JsonFormat::JsonLines)
        .finish()
        .map_err(|e| Error::parse(format!("[io::json::read] Invalid JSON records in {}", path.display()), e))
}

/// Writes a DataFrame to `path` as newline-delimited JSON records.
pub fn write_json_records(path: &Path, df: &mut DataFrame) -> Result<()> {
    let mut sink = PendingWrite::open(path, true)?;
    JsonWriter::new(&mut sink)
        .with_json_format(JsonFormat::JsonLines)
        .finish(df)?;
    sink.finalize()
}

/// Read DataFrame from newline-delimited JSON bytes.
pub fn read_json_records_bytes(bytes: &[u8]) -> Result<DataFrame> {
    JsonReader::new(Cursor::new(bytes))
        .with_json_format(JsonFormat::JsonLines)
        .finish()
        .map_err(|e| Error::parse("[io::json::read] Invalid JSON records", e))
}

/// Convert a DataFrame into a JSON array of row records.
pub fn records_from_table(df: &DataFrame) -> Result<Value> {
    let mut out = Vec::new();
    JsonWriter::new(&mut out)
        .with_json_format(JsonFormat::Json)
        .finish(&mut df.clone())?;
    Ok(serde_json::from_slice(&out)?)
}

#[cfg(test)]
mod tests {
    use polars::df;
    use serde_json::json;

    use super::*;

    #[test]
    fn records_are_row_objects() {
        let df = df!("lat" => [50.03], "lon" => [10.35]).unwrap();
        assert_eq!(records_from_table(&df).unwrap(), json!([{"lat": 50.03, "lon": 10.35}]));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(read_json(&path), Err(Error::Parse { .. })));
    }
}
