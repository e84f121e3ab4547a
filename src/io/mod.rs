//! Reading and writing of common file encodings.
//!
//! Each submodule handles one encoding; [`read`] and [`write`] dispatch on a
//! [`Format`] and exchange a [`Content`] value. Every write goes to a temp file
//! next to the target and is renamed into place.
//!
//! # Format Modules
//!
//! - `text` - plain UTF-8 text and line picking
//! - `csv` - delimited tabular data (CSV, TSV)
//! - `json` - JSON documents and newline-delimited JSON records
//! - `archive` - zip archive listing, member reading and extraction

mod csv;
mod json;
pub(crate) mod pending;
mod text;
mod archive;

use std::{fmt, path::Path, str::FromStr};

use polars::frame::DataFrame;
use serde_json::Value;

use crate::error::{Error, Result};

pub use self::csv::*;
pub use self::json::*;
pub use self::text::*;
pub use self::archive::*;

/// Supported file encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Text,
    Csv,
    Tsv,
    Json,
    JsonLines,
    GeoJson,
}

impl Format {
    pub const ALL: [Format; 6] = [Self::Text, Self::Csv, Self::Tsv, Self::Json, Self::JsonLines, Self::GeoJson];

    /// Infer the format from the file extension of `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::invalid(format!("No file extension on {}", path.display())))?;
        ext.parse()
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::JsonLines => "jsonl",
            Self::GeoJson => "geojson",
        }
    }

    /// Whether this format holds tabular content.
    pub fn is_tabular(&self) -> bool {
        matches!(self, Self::Csv | Self::Tsv | Self::JsonLines)
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "tsv" | "tab" | "table" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            "jsonl" | "ndjson" | "jsonlines" => Ok(Self::JsonLines),
            "geojson" => Ok(Self::GeoJson),
            other => Err(Error::invalid(format!("Data format not recognised: '{other}'"))),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Parsed file content.
#[derive(Clone, Debug)]
pub enum Content {
    Text(String),
    Table(DataFrame),
    Json(Value),
}

impl Content {
    fn kind(&self) -> &'static str {
        match self {
            Content::Text(_) => "text",
            Content::Table(_) => "table",
            Content::Json(_) => "json",
        }
    }
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Content::Text(a), Content::Text(b)) => a == b,
            (Content::Table(a), Content::Table(b)) => a.equals_missing(b),
            (Content::Json(a), Content::Json(b)) => a == b,
            _ => false,
        }
    }
}

/// Read and parse the file at `path` as `format`.
pub fn read(path: &Path, format: Format) -> Result<Content> {
    Ok(match format {
        Format::Text => Content::Text(read_text(path)?),
        Format::Csv => Content::Table(read_csv(path, &CsvOptions::default())?),
        Format::Tsv => Content::Table(read_csv(path, &CsvOptions::tsv())?),
        Format::JsonLines => Content::Table(read_json_records(path)?),
        Format::Json => Content::Json(read_json(path)?),
        Format::GeoJson => {
            let value = read_json(path)?;
            if value.get("type").and_then(Value::as_str).is_none() {
                return Err(Error::parse(
                    format!("[io::read] {}", path.display()),
                    "GeoJSON object has no \"type\" member",
                ));
            }
            Content::Json(value)
        }
    })
}

/// Read the file at `path`, inferring the format from its extension.
pub fn read_path(path: &Path) -> Result<Content> {
    read(path, Format::from_path(path)?)
}

/// Write `content` to `path` encoded as `format`.
///
/// Tables are written as CSV, TSV, JSON lines or JSON records. GeoJSON only
/// accepts JSON content: turn point tables into GeoJSON first with
/// [`crate::geo::points_to_geojson`].
pub fn write(path: &Path, content: &Content, format: Format) -> Result<()> {
    match (format, content) {
        (Format::Text, Content::Text(text)) => write_text(path, text),
        (Format::Csv, Content::Table(df)) => write_csv(path, &mut df.clone(), &CsvOptions::default()),
        (Format::Tsv, Content::Table(df)) => write_csv(path, &mut df.clone(), &CsvOptions::tsv()),
        (Format::JsonLines, Content::Table(df)) => write_json_records(path, &mut df.clone()),
        (Format::Json | Format::GeoJson, Content::Json(value)) => write_json(path, value, true),
        (Format::Json, Content::Table(df)) => write_json(path, &records_from_table(df)?, true),
        (format, content) => Err(Error::invalid(format!(
            "Cannot write {} content as {format}", content.kind()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_and_extensions() {
        assert_eq!("CSV".parse::<Format>().unwrap(), Format::Csv);
        assert_eq!(".ndjson".parse::<Format>().unwrap(), Format::JsonLines);
        assert_eq!(Format::from_path(Path::new("a/b/regions.geojson")).unwrap(), Format::GeoJson);
        assert!("xls".parse::<Format>().is_err());
        assert!(Format::from_path(Path::new("Makefile")).is_err());
        for format in Format::ALL {
            assert_eq!(format.extension().parse::<Format>().unwrap(), format);
        }
    }

    #[test]
    fn mismatched_content_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.csv");
        let err = write(&path, &Content::Text("a,b".into()), Format::Csv).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(!path.exists());

        let table = Content::Table(polars::df!("lat" => [1.0], "lon" => [2.0]).unwrap());
        let geo = dir.path().join("x.geojson");
        assert!(matches!(write(&geo, &table, Format::GeoJson), Err(Error::InvalidInput(_))));
    }
}
