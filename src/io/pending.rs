use std::{fs::File, io::{Seek, SeekFrom, Write}, path::{Path, PathBuf}};

use log::debug;
use tempfile::NamedTempFile;

use crate::error::{Error, IoContext, Result};

/// Write-then-rename wrapper for atomic file outputs.
pub(crate) struct PendingWrite {
    target: PathBuf,
    tmp: Option<(NamedTempFile, bool)>, // (file, need_fsync_dir)
}

impl PendingWrite {
    /// Open a temp file next to `target`. Refuses to replace an existing file unless `force`.
    pub(crate) fn open(target: &Path, force: bool) -> Result<Self> {
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => Some(p),
            _ => None,
        };
        if let Some(parent) = parent {
            std::fs::create_dir_all(parent)
                .io_context(|| format!("[io::write] Failed to create directory {}", parent.display()))?;
        }
        if target.exists() {
            if !force {
                return Err(Error::invalid(format!(
                    "Refusing to overwrite existing file: {}", target.display()
                )));
            }
            debug!("[io::write] Replacing existing file {}", target.display());
        }
        let tmp = NamedTempFile::new_in(parent.unwrap_or(Path::new(".")))
            .io_context(|| format!("[io::write] Failed to create temp file for {}", target.display()))?;

        Ok(Self { target: target.to_path_buf(), tmp: Some((tmp, parent.is_some())) })
    }

    /// Finalize the write by renaming the temp file over the target.
    pub(crate) fn finalize(mut self) -> Result<()> {
        let Some((tmp, need_fsync_dir)) = self.tmp.take() else {
            return Err(Error::invalid(format!("{} already finalized", self.target.display())));
        };
        tmp.as_file().sync_all().ok(); // best-effort fsync file
        tmp.persist(&self.target)
            .map_err(|e| e.error)
            .io_context(|| format!("[io::write] Failed to rename into {}", self.target.display()))?;
        if need_fsync_dir {
            if let Some(dir) = self.target.parent() {
                let _ = File::open(dir).and_then(|f| f.sync_all());
            }
        }
        debug!("[io::write] wrote {}", self.target.display());
        Ok(())
    }

    fn file(&mut self) -> std::io::Result<&mut NamedTempFile> {
        self.tmp.as_mut()
            .map(|(file, _)| file)
            .ok_or_else(|| std::io::Error::other("pending write already finalized"))
    }
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.file()?.write(buf)
    }
    fn flush(&mut self) -> std::io::Result<()> {
        self.file()?.flush()
    }
}

impl Seek for PendingWrite {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.file()?.as_file_mut().seek(pos)
    }
}

/// Atomically replace `path` with `bytes`.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut sink = PendingWrite::open(path, true)?;
    sink.write_all(bytes)
        .io_context(|| format!("[io::write] Failed to write {}", path.display()))?;
    sink.finalize()
}
