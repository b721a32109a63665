//! Read-only filesystem queries.
//!
//! Existence and type probes always hit the filesystem fresh; they never
//! consult or populate the memoized stat cache, so a probe after an
//! external change tells the truth even while stat fields stay memoized.

use std::env;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::value::{ParseOptions, PathValue};

impl PathValue {
    /// Whether anything exists at this path (symlinks are followed).
    #[must_use]
    pub fn exists(&self) -> bool {
        self.to_path_buf().exists()
    }

    /// Whether a regular file exists at this path.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.to_path_buf().is_file()
    }

    /// Whether a directory exists at this path.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.to_path_buf().is_dir()
    }

    /// Whether a symlink sits at this path (the link itself, not its
    /// target).
    #[must_use]
    pub fn is_symlink(&self) -> bool {
        fs::symlink_metadata(self.to_path_buf())
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
    }

    /// Read the target of a symlink at this path.
    ///
    /// # Errors
    ///
    /// Propagates the underlying readlink failure, or
    /// [`Error::InvalidInput`] if the target is not valid UTF-8.
    pub fn read_link(&self) -> Result<Self> {
        let target = fs::read_link(self.to_path_buf())?;
        value_from_path(&target)
    }

    /// List this directory's entries as path values, sorted by full path
    /// string.
    ///
    /// # Errors
    ///
    /// Propagates the underlying directory-read failure.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pathform::PathValue;
    ///
    /// let etc = PathValue::from_dir("/etc").unwrap();
    /// for child in etc.children().unwrap() {
    ///     println!("{child}");
    /// }
    /// ```
    pub fn children(&self) -> Result<Vec<Self>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(self.to_path_buf())? {
            let entry = entry?;
            out.push(value_from_path(&entry.path())?);
        }
        out.sort();
        Ok(out)
    }

    /// Expand a glob pattern relative to this directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`] for a malformed pattern and propagates
    /// read failures on matched entries.
    pub fn glob(&self, pattern: &str) -> Result<Vec<Self>> {
        glob(&format!("{}/{pattern}", self.dir_str().trim_end_matches('/')))
    }
}

/// Expand a glob pattern into sorted path values.
///
/// Unreadable matches are skipped with a warning rather than aborting the
/// expansion.
///
/// # Errors
///
/// Returns [`Error::Pattern`] if the pattern itself is malformed.
///
/// # Examples
///
/// ```no_run
/// use pathform::ops::glob;
///
/// let sources = glob("/srv/app/src/*.rs").unwrap();
/// assert!(sources.iter().all(|v| v.ext() == Some("rs")));
/// ```
pub fn glob(pattern: &str) -> Result<Vec<PathValue>> {
    let mut out = Vec::new();
    for entry in glob::glob(pattern)? {
        match entry {
            Ok(path) => out.push(value_from_path(&path)?),
            Err(e) => {
                log::warn!("skipping unreadable glob match: {e}");
            }
        }
    }
    out.sort();
    Ok(out)
}

/// Search the `PATH` environment variable for an executable, returning
/// the first hit.
///
/// On unix, a candidate must be a regular file with an execute bit set;
/// elsewhere any regular file matches. Directories whose paths are not
/// valid UTF-8 are skipped.
///
/// # Examples
///
/// ```no_run
/// use pathform::ops::which;
///
/// if let Some(sh) = which("sh") {
///     assert_eq!(sh.base(), Some("sh"));
/// }
/// ```
#[must_use]
pub fn which(name: &str) -> Option<PathValue> {
    let search = env::var_os("PATH")?;
    for dir in env::split_paths(&search) {
        let candidate = dir.join(name);
        if is_executable(&candidate) {
            if let Some(s) = candidate.to_str() {
                if let Ok(v) = ParseOptions::file().parse(s) {
                    return Some(v);
                }
            }
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    fs::metadata(path)
        .map(|m| m.is_file() && m.mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Build a value from an OS path found on disk, probing its kind.
fn value_from_path(path: &Path) -> Result<PathValue> {
    let s = path.to_str().ok_or_else(|| Error::InvalidInput {
        input: path.to_string_lossy().into_owned(),
        reason: "path is not valid UTF-8".to_string(),
    })?;
    if path.is_dir() {
        ParseOptions::dir().parse(s)
    } else {
        ParseOptions::file().parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probes_against_tempdir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("probe.txt");
        fs::write(&file, b"x").unwrap();

        let vdir = PathValue::from_dir(dir.path().to_str().unwrap()).unwrap();
        let vfile = PathValue::from_file(file.to_str().unwrap()).unwrap();

        assert!(vdir.exists());
        assert!(vdir.is_dir());
        assert!(!vdir.is_file());
        assert!(vfile.is_file());
        assert!(!vfile.is_symlink());

        let missing = PathValue::from_file("/no/such/thing").unwrap();
        assert!(!missing.exists());
    }

    #[test]
    fn test_children_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), b"").unwrap();
        fs::write(dir.path().join("a.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let v = PathValue::from_dir(dir.path().to_str().unwrap()).unwrap();
        let children = v.children().unwrap();
        let names: Vec<_> = children
            .iter()
            .map(|c| c.filename().unwrap_or_else(|| c.dirs().last().unwrap().clone()))
            .collect();
        assert_eq!(names, ["a.txt", "b.txt", "sub"]);
    }

    #[test]
    fn test_glob_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one.log"), b"").unwrap();
        fs::write(dir.path().join("two.log"), b"").unwrap();
        fs::write(dir.path().join("other.txt"), b"").unwrap();

        let v = PathValue::from_dir(dir.path().to_str().unwrap()).unwrap();
        let logs = v.glob("*.log").unwrap();
        assert_eq!(logs.len(), 2);
        assert!(logs.iter().all(|l| l.ext() == Some("log")));
    }

    #[test]
    fn test_glob_rejects_bad_pattern() {
        assert!(glob("/tmp/[").is_err());
    }

    #[test]
    #[cfg(unix)]
    fn test_which_finds_executables_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("runme");
        fs::write(&exe, b"#!/bin/sh\n").unwrap();
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();
        fs::write(dir.path().join("notme"), b"").unwrap();

        let saved = env::var_os("PATH");
        env::set_var("PATH", dir.path());

        let hit = which("runme");
        let miss = which("notme");

        match saved {
            Some(val) => env::set_var("PATH", val),
            None => env::remove_var("PATH"),
        }

        assert_eq!(hit.unwrap().base(), Some("runme"));
        assert!(miss.is_none());
    }

    #[test]
    #[cfg(unix)]
    fn test_read_link() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target.txt");
        let link = dir.path().join("link.txt");
        fs::write(&target, b"x").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let v = PathValue::from_file(link.to_str().unwrap()).unwrap();
        assert!(v.is_symlink());
        let resolved = v.read_link().unwrap();
        assert_eq!(resolved.to_path_buf(), target);
    }
}
