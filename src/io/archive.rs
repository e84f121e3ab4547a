//! Zip archive helpers.

use std::{fs::{self, File}, io::{Read, Seek}, path::{Path, PathBuf}};

use log::{debug, warn};
use zip::ZipArchive;

use crate::error::{Error, IoContext, Result};

fn open_archive(zip_path: &Path) -> Result<ZipArchive<File>> {
    let file = File::open(zip_path)
        .io_context(|| format!("[io::archive] Failed to open {}", zip_path.display()))?;
    Ok(ZipArchive::new(file)?)
}

/// Resolve `member` against the archive entries: an exact name wins, otherwise the
/// single entry whose name ends with `member`.
pub(crate) fn resolve_member<R: Read + Seek>(archive: &ZipArchive<R>, member: &str) -> Result<String> {
    let names: Vec<&str> = archive.file_names().collect();
    if names.contains(&member) {
        return Ok(member.to_string());
    }
    let matches: Vec<&str> = names.into_iter().filter(|n| n.ends_with(member)).collect();
    match matches.as_slice() {
        [one] => Ok(one.to_string()),
        [] => Err(Error::invalid(format!("File '{member}' not found in zip source"))),
        many => {
            warn!("[io::archive] {} entries match '{member}'", many.len());
            Err(Error::invalid(format!("Multiple files matching '{member}' in zip source")))
        }
    }
}

/// Names of all entries of the archive at `zip_path`, in archive order.
pub fn zip_names(zip_path: &Path) -> Result<Vec<String>> {
    let archive = open_archive(zip_path)?;
    let mut names: Vec<(usize, String)> = archive.file_names()
        .filter_map(|n| archive.index_for_name(n).map(|i| (i, n.to_string())))
        .collect();
    names.sort_by_key(|(i, _)| *i);
    Ok(names.into_iter().map(|(_, n)| n).collect())
}

/// Read a single archive entry into memory.
/// When `member` is `None`, the archive must hold exactly one entry.
pub fn read_zip_member(zip_path: &Path, member: Option<&str>) -> Result<Vec<u8>> {
    let mut archive = open_archive(zip_path)?;
    read_member_from(&mut archive, member)
}

pub(crate) fn read_member_from<R: Read + Seek>(archive: &mut ZipArchive<R>, member: Option<&str>) -> Result<Vec<u8>> {
    let name = match member {
        Some(m) => resolve_member(archive, m)?,
        None if archive.len() == 1 => archive.by_index(0)?.name().to_string(),
        None => return Err(Error::invalid(format!(
            "Archive holds {} entries, a member name is required", archive.len()
        ))),
    };
    let mut entry = archive.by_name(&name)?;
    let mut bytes = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut bytes)
        .io_context(|| format!("[io::archive] Failed to read member {name}"))?;
    Ok(bytes)
}

/// Extracts the given `.zip` file to the target directory.
/// If `delete_after` is `true`, removes the `.zip` file after a successful extraction.
pub fn extract_zip(zip_path: &Path, dest_dir: &Path, delete_after: bool) -> Result<()> {
    let mut archive = open_archive(zip_path)?;
    archive.extract(dest_dir)?;
    debug!("[io::archive] extracted {} -> {}", zip_path.display(), dest_dir.display());

    if delete_after {
        fs::remove_file(zip_path)
            .io_context(|| format!("[io::archive] Failed to delete {}", zip_path.display()))?;
    }
    Ok(())
}

/// Extract the selected members into `dest_dir`, returning the written paths.
pub fn extract_zip_members(zip_path: &Path, members: &[&str], dest_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut archive = open_archive(zip_path)?;
    let mut written = Vec::with_capacity(members.len());
    for member in members {
        let name = resolve_member(&archive, member)?;
        let mut entry = archive.by_name(&name)?;
        let rel = entry.enclosed_name()
            .ok_or_else(|| Error::invalid(format!("Unsafe path in zip entry: {name}")))?;
        let out = dest_dir.join(rel);
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)
                .io_context(|| format!("[io::archive] Failed to create directory {}", parent.display()))?;
        }
        let mut file = File::create(&out)
            .io_context(|| format!("[io::archive] Failed to create {}", out.display()))?;
        std::io::copy(&mut entry, &mut file)
            .io_context(|| format!("[io::archive] Failed to extract {name}"))?;
        written.push(out);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::{write::SimpleFileOptions, ZipWriter};

    use super::*;

    fn sample_zip(dir: &Path) -> PathBuf {
        let path = dir.join("sample.zip");
        let mut zw = ZipWriter::new(File::create(&path).unwrap());
        for (name, body) in [("data/nuts.csv", "id\n1\n"), ("data/lau.csv", "id\n2\n"), ("README", "hi")] {
            zw.start_file(name, SimpleFileOptions::default()).unwrap();
            zw.write_all(body.as_bytes()).unwrap();
        }
        zw.finish().unwrap();
        path
    }

    #[test]
    fn members_resolve_by_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let zip = sample_zip(dir.path());

        assert_eq!(zip_names(&zip).unwrap(), vec!["data/nuts.csv", "data/lau.csv", "README"]);
        assert_eq!(read_zip_member(&zip, Some("nuts.csv")).unwrap(), b"id\n1\n");
        assert!(read_zip_member(&zip, Some(".csv")).is_err()); // ambiguous
        assert!(read_zip_member(&zip, Some("missing.csv")).is_err());
        assert!(read_zip_member(&zip, None).is_err());
    }

    #[test]
    fn extract_selected_members() {
        let dir = tempfile::tempdir().unwrap();
        let zip = sample_zip(dir.path());
        let out = dir.path().join("out");

        let written = extract_zip_members(&zip, &["lau.csv"], &out).unwrap();
        assert_eq!(written, vec![out.join("data/lau.csv")]);
        assert_eq!(fs::read_to_string(&written[0]).unwrap(), "id\n2\n");
    }
}
