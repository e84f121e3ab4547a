use std::path::{Component, Path, PathBuf};

use crate::error::{IoContext, Result};

/// Canonical absolute path with symlinks resolved. Fails when `path` does not exist.
pub fn real_path(path: &Path) -> Result<PathBuf> {
    path.canonicalize()
        .io_context(|| format!("Path not found: {}", path.display()))
}

/// Lexically normalise `path`: drop `.` segments and duplicate separators,
/// fold `..` into its parent where one exists. The filesystem is not consulted.
pub fn norm_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => { out.pop(); }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(comp),
            },
            c => out.push(c),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Absolute path of `rel_file` inside `rel_dir` inside `root`, lexically normalised.
pub fn fill_path(root: &Path, rel_dir: &Path, rel_file: &Path) -> Result<PathBuf> {
    let joined = root.join(rel_dir).join(rel_file);
    let absolute = if joined.is_absolute() {
        joined
    } else {
        std::env::current_dir()
            .io_context(|| "Failed to read the current directory")?
            .join(joined)
    };
    Ok(norm_path(&absolute))
}

/// File name without its final extension: `a/b/data.tar.gz` gives `data.tar`.
pub fn base_name(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

/// Last component of `path`.
pub fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|s| s.to_string_lossy().into_owned())
}

/// Replace the extension of `path`; a leading dot on `ext` is optional.
pub fn with_extension(path: &Path, ext: &str) -> PathBuf {
    path.with_extension(ext.trim_start_matches('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexical_normalisation() {
        assert_eq!(norm_path(Path::new("a//b/./c/../d")), PathBuf::from("a/b/d"));
        assert_eq!(norm_path(Path::new("/../x")), PathBuf::from("/x"));
        assert_eq!(norm_path(Path::new("../x/..")), PathBuf::from(".."));
        assert_eq!(norm_path(Path::new("./")), PathBuf::from("."));
    }

    #[test]
    fn names_and_extensions() {
        let p = Path::new("/data/eu/nuts.tar.gz");
        assert_eq!(base_name(p).as_deref(), Some("nuts.tar"));
        assert_eq!(file_name(p).as_deref(), Some("nuts.tar.gz"));
        assert_eq!(with_extension(Path::new("x/y.csv"), ".json"), PathBuf::from("x/y.json"));
        assert_eq!(base_name(Path::new("/")), None);
    }

    #[test]
    fn fill_and_real() {
        let p = fill_path(Path::new("/root"), Path::new("a/../b"), Path::new("c.txt")).unwrap();
        assert_eq!(p, PathBuf::from("/root/b/c.txt"));

        let dir = tempfile::tempdir().unwrap();
        assert!(real_path(dir.path()).unwrap().is_absolute());
        assert!(real_path(&dir.path().join("missing")).is_err());
    }
}
