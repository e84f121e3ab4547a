use std::{
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;
use walkdir::WalkDir;

use crate::error::{Error, IoContext, Result};

use super::datetime::{dtformat, format_datetime, DateFormat};
use super::path::real_path;

/// Create the directory if it doesn't exist; error if a non-directory exists there.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            return Err(Error::invalid(format!("Path exists but is not a directory: {}", path.display())));
        }
    } else {
        fs::create_dir_all(path)
            .io_context(|| format!("Failed to create directory {}", path.display()))?;
    }
    Ok(())
}

/// Error unless the directory already exists.
pub fn require_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::invalid(format!("Directory does not exist: {}", path.display())));
    }
    if !path.is_dir() {
        return Err(Error::invalid(format!("Path exists but is not a directory: {}", path.display())));
    }
    Ok(())
}

/// Remove a file, or a directory tree when `recursive`. Missing paths are not an error.
/// Returns whether anything was removed.
pub fn remove(path: &Path, recursive: bool) -> Result<bool> {
    let Ok(meta) = fs::symlink_metadata(path) else { return Ok(false) };
    if meta.is_dir() {
        if !recursive {
            return Err(Error::invalid(format!("{} is a directory; pass recursive to remove it", path.display())));
        }
        warn!("[misc::fs] Removing directory tree {}", path.display());
        fs::remove_dir_all(path)
            .io_context(|| format!("Failed to remove directory {}", path.display()))?;
    } else {
        fs::remove_file(path)
            .io_context(|| format!("Failed to remove file {}", path.display()))?;
    }
    Ok(true)
}

/// Whether a temporary file can be created in `path` (or its parent, for files).
pub fn is_writable(path: &Path) -> bool {
    let dir = if path.is_dir() {
        path
    } else {
        match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    };
    tempfile::tempfile_in(dir).is_ok()
}

/// Case-insensitive existence check. Returns the path as spelled on disk,
/// preferring an exact match. Fails when the parent directory is missing.
pub fn file_exists_ci(path: &Path) -> Result<Option<PathBuf>> {
    if path.exists() {
        return Ok(Some(path.to_path_buf()));
    }
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return Err(Error::invalid(format!("No file name in {}", path.display())));
    };
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let entries = fs::read_dir(parent)
        .io_context(|| format!("Path not found: {}", parent.display()))?;

    let wanted = name.to_lowercase();
    for entry in entries {
        let entry = entry.io_context(|| format!("Failed to list {}", parent.display()))?;
        if entry.file_name().to_string_lossy().to_lowercase() == wanted {
            return Ok(Some(entry.path()));
        }
    }
    Ok(None)
}

/// Escape glob class members for a regex class, keeping `a-z` ranges.
fn push_class_members(re: &mut String, members: &[char]) {
    let push = |re: &mut String, c: char| {
        if matches!(c, '\\' | '[' | ']' | '^' | '&' | '~' | '-') { re.push('\\') }
        re.push(c);
    };
    let mut i = 0;
    while i < members.len() {
        if i + 2 < members.len() && members[i + 1] == '-' {
            push(re, members[i]);
            re.push('-');
            push(re, members[i + 2]);
            i += 3;
        } else {
            push(re, members[i]);
            i += 1;
        }
    }
}

/// Translate a shell glob (`*`, `?`, `[...]`, `[!...]`) into an anchored regex.
fn glob_regex(pattern: &str) -> Result<Regex> {
    let mut re = String::from("^");
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            '[' => {
                let negated = chars.peek() == Some(&'!');
                if negated { chars.next(); }
                // A ']' right after the opening bracket is a member, not the end.
                let mut members = Vec::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' && !members.is_empty() { closed = true; break }
                    members.push(c);
                }
                if !closed {
                    return Err(Error::invalid(format!("Unclosed '[' in pattern: {pattern}")));
                }
                re.push('[');
                if negated { re.push('^') }
                push_class_members(&mut re, &members);
                re.push(']');
            }
            c => re.push_str(&regex::escape(&c.to_string())),
        }
    }
    re.push('$');
    Regex::new(&re).map_err(|e| Error::invalid(format!("Invalid pattern '{pattern}': {e}")))
}

/// Recursively list files under `dir` whose name matches the glob `pattern`, sorted.
pub fn find_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    require_dir_exists(dir)?;
    let re = glob_regex(pattern)?;

    let mut found = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Io {
            context: format!("Failed to walk {}", dir.display()),
            source: e.into(),
        })?;
        if entry.file_type().is_file() && re.is_match(&entry.file_name().to_string_lossy()) {
            found.push(entry.into_path());
        }
    }
    debug!("[misc::fs] {} files matching '{pattern}' under {}", found.len(), dir.display());
    Ok(found)
}

/// Coarse MIME type guessed from the file extension.
pub fn mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    Some(match ext.as_str() {
        "txt" | "log" => "text/plain",
        "csv" => "text/csv",
        "tsv" => "text/tab-separated-values",
        "htm" | "html" => "text/html",
        "xml" => "application/xml",
        "json" => "application/json",
        "jsonl" | "ndjson" => "application/x-ndjson",
        "geojson" => "application/geo+json",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => return None,
    })
}

/// Reproducible UUID (v3, DNS namespace) of the canonical path of `path`, or a
/// random v4 UUID when no path is given.
pub fn file_uuid(path: Option<&Path>) -> Result<Uuid> {
    match path {
        None => Ok(Uuid::new_v4()),
        Some(p) if p.as_os_str().is_empty() => Ok(Uuid::new_v4()),
        Some(p) => {
            let real = real_path(p)?;
            Ok(Uuid::new_v3(&Uuid::NAMESPACE_DNS, real.to_string_lossy().as_bytes()))
        }
    }
}

/// Stream `root/rel_path` through SHA-256. Returns `(rel_path, hex digest)`.
pub fn sha256_file(rel_path: &str, root: &Path) -> Result<(String, String)> {
    let full = root.join(rel_path);
    let mut file = File::open(&full)
        .io_context(|| format!("open for hash {}", full.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 1 << 16];
    loop {
        let n = file.read(&mut buf)
            .io_context(|| format!("read for hash {}", full.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    let hex = hex::encode(hasher.finalize());
    Ok((rel_path.to_string(), hex))
}

/// Metadata summary of a file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub modified: Option<String>,
    pub created: Option<String>,
    pub accessed: Option<String>,
    pub uuid: String,
    pub sha256: Option<String>,
}

/// Collect [`FileInfo`] for `path`. Timestamps are UTC, formatted with the default [`dtformat`].
/// Directories get no digest.
pub fn file_info(path: &Path) -> Result<FileInfo> {
    let meta = fs::metadata(path)
        .io_context(|| format!("File not found: {}", path.display()))?;
    let real = real_path(path)?;

    let stamp = |t: std::io::Result<std::time::SystemTime>| -> Option<String> {
        let dt: DateTime<Utc> = t.ok()?.into();
        format_datetime(&dt.naive_utc(), &DateFormat::Pattern(dtformat(None, None, None))).ok()
    };

    let sha256 = if meta.is_file() {
        let parent = real.parent().unwrap_or(Path::new("/"));
        let name = real.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        Some(sha256_file(&name, parent)?.1)
    } else {
        None
    };

    Ok(FileInfo {
        name: real.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default(),
        size: meta.len(),
        modified: stamp(meta.modified()),
        created: stamp(meta.created()),
        accessed: stamp(meta.accessed()),
        uuid: file_uuid(Some(&real))?.simple().to_string(),
        sha256,
        path: real,
    })
}
