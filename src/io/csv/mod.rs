//! Delimited (CSV/TSV) reading and writing operations.

mod read;
mod write;

pub use read::*;
pub use write::*;

/// Layout of a delimited file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CsvOptions {
    pub separator: u8,
    pub has_header: bool,
}

impl CsvOptions {
    /// Tab-separated values with a header row.
    pub fn tsv() -> Self {
        Self { separator: b'\t', ..Self::default() }
    }

    /// Same layout with another separator.
    pub fn with_separator(self, separator: u8) -> Self {
        Self { separator, ..self }
    }
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { separator: b',', has_header: true }
    }
}
