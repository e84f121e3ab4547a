//! Plain text reading and writing operations.

use std::{collections::BTreeSet, fs::File, io::{BufRead, BufReader}, path::Path};

use crate::error::{IoContext, Result};

use super::pending::write_atomic;

/// Reads the whole file at `path` as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .io_context(|| format!("[io::text::read] Failed to read text file: {}", path.display()))
}

/// Writes `text` to `path`, replacing any previous content.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    write_atomic(path, text.as_bytes())
}

/// Reads the file at `path` line by line, without line terminators.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .io_context(|| format!("[io::text::read] Failed to open text file: {}", path.display()))?;
    BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .io_context(|| format!("[io::text::read] Failed to read lines from {}", path.display()))
}

/// Pick the numbered lines (0-based) from the file at `path`, in file order.
/// Row numbers past the end of the file are ignored.
pub fn pick_lines(path: &Path, rows: &[usize]) -> Result<Vec<String>> {
    let wanted: BTreeSet<usize> = rows.iter().copied().collect();
    let Some(&last) = wanted.last() else { return Ok(Vec::new()) };

    let file = File::open(path)
        .io_context(|| format!("[io::text::read] Failed to open text file: {}", path.display()))?;

    let mut picked = Vec::with_capacity(wanted.len());
    for (i, line) in BufReader::new(file).lines().enumerate() {
        if i > last { break }
        let line = line
            .io_context(|| format!("[io::text::read] Failed to read line {i} of {}", path.display()))?;
        if wanted.contains(&i) { picked.push(line) }
    }
    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_lines_keeps_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.txt");
        write_text(&path, "zero\none\ntwo\nthree\n").unwrap();

        assert_eq!(pick_lines(&path, &[3, 0, 7]).unwrap(), vec!["zero", "three"]);
        assert!(pick_lines(&path, &[]).unwrap().is_empty());
    }

    #[test]
    fn read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_text(&dir.path().join("nope.txt")).is_err());
    }
}
