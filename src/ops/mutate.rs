//! Filesystem mutation operations.
//!
//! Every operation here either completes and updates exactly what it
//! documents, or fails leaving the receiver's in-memory decomposition
//! intact. The one operation that mutates its receiver is
//! [`PathValue::rename`], which models a completed on-disk rename; it
//! adopts the destination's fields only after the OS call succeeds.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::value::{Overrides, PathValue};

impl PathValue {
    /// Rename on disk, then update this value in place to the
    /// destination.
    ///
    /// The destination is derived with [`with`](Self::with). If anything
    /// already sits at the destination (including a dangling symlink) the
    /// call fails with [`Error::AlreadyExists`] before touching the disk.
    /// On any failure the receiver is left completely unchanged; only
    /// after the OS rename succeeds are the receiver's fields replaced
    /// and its stat cache reset.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyExists`] on destination collision, any derivation
    /// error from `with`, or the underlying rename failure.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pathform::{Overrides, PathValue};
    ///
    /// let mut v = PathValue::from_file("/tmp/draft.txt").unwrap();
    /// v.rename(&Overrides::new().base("final")).unwrap();
    /// assert_eq!(v.path_str(), "/tmp/final.txt");
    /// ```
    pub fn rename(&mut self, overrides: &Overrides) -> Result<()> {
        let dest = self.with(overrides)?;
        let dest_path = dest.to_path_buf();

        // symlink_metadata so a dangling symlink still counts as taken.
        if fs::symlink_metadata(&dest_path).is_ok() {
            return Err(Error::AlreadyExists { path: dest_path });
        }

        fs::rename(self.to_path_buf(), &dest_path)?;
        log::debug!("renamed {} -> {}", self.path_str(), dest.path_str());

        self.dirs = dest.dirs;
        self.base = dest.base;
        self.ext = dest.ext;
        self.relativity = dest.relativity;
        self.reset();
        Ok(())
    }

    /// Create this directory (parent must exist).
    ///
    /// # Errors
    ///
    /// Propagates the underlying create failure.
    pub fn mkdir(&self) -> Result<()> {
        fs::create_dir(self.to_path_buf())?;
        Ok(())
    }

    /// Create this directory and any missing ancestors.
    ///
    /// # Errors
    ///
    /// Propagates the underlying create failure.
    pub fn mkpath(&self) -> Result<()> {
        fs::create_dir_all(self.to_path_buf())?;
        Ok(())
    }

    /// Remove the file, or the directory if it is empty.
    ///
    /// # Errors
    ///
    /// Propagates the underlying remove failure (a non-empty directory
    /// fails).
    pub fn unlink(&self) -> Result<()> {
        let path = self.to_path_buf();
        if path.is_dir() {
            fs::remove_dir(path)?;
        } else {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Remove this directory and everything beneath it.
    ///
    /// # Errors
    ///
    /// Propagates the underlying remove failure.
    pub fn rmtree(&self) -> Result<()> {
        fs::remove_dir_all(self.to_path_buf())?;
        Ok(())
    }

    /// Truncate (or extend with zeros) the file to `len` bytes.
    ///
    /// # Errors
    ///
    /// Propagates the underlying open or set-length failure.
    pub fn truncate(&self, len: u64) -> Result<()> {
        let file = fs::OpenOptions::new().write(true).open(self.to_path_buf())?;
        file.set_len(len)?;
        Ok(())
    }

    /// Copy this file's contents to `dest`, returning the bytes copied.
    ///
    /// # Errors
    ///
    /// Propagates the underlying copy failure.
    pub fn copy_to(&self, dest: &Self) -> Result<u64> {
        let copied = fs::copy(self.to_path_buf(), dest.to_path_buf())?;
        log::debug!("copied {copied} bytes {} -> {}", self.path_str(), dest.path_str());
        Ok(copied)
    }

    /// Move this file or directory to `dest`.
    ///
    /// Tries an OS rename first; for files that fail to rename (for
    /// instance across devices) it falls back to copy-then-remove.
    ///
    /// # Errors
    ///
    /// Propagates the underlying rename or copy failure.
    pub fn move_to(&self, dest: &Self) -> Result<()> {
        let from = self.to_path_buf();
        let to = dest.to_path_buf();
        match fs::rename(&from, &to) {
            Ok(()) => Ok(()),
            Err(rename_err) if from.is_file() => {
                log::debug!("rename failed ({rename_err}); copying instead");
                fs::copy(&from, &to)?;
                fs::remove_file(&from)?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Create a hard link at `dest` pointing at this file.
    ///
    /// # Errors
    ///
    /// Propagates the underlying link failure.
    pub fn hard_link_to(&self, dest: &Self) -> Result<()> {
        fs::hard_link(self.to_path_buf(), dest.to_path_buf())?;
        Ok(())
    }

    /// Create a symlink at `dest` pointing at this path.
    ///
    /// # Errors
    ///
    /// Propagates the underlying symlink failure.
    #[cfg(unix)]
    pub fn symlink_to(&self, dest: &Self) -> Result<()> {
        std::os::unix::fs::symlink(self.to_path_buf(), dest.to_path_buf())?;
        Ok(())
    }

    /// Set unix permission bits on this path.
    ///
    /// # Errors
    ///
    /// Propagates the underlying permission-change failure.
    #[cfg(unix)]
    pub fn chmod(&self, mode: u32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(self.to_path_buf(), fs::Permissions::from_mode(mode))?;
        Ok(())
    }

    /// Set unix permission bits on this directory and everything beneath
    /// it.
    ///
    /// # Errors
    ///
    /// [`Error::NotADirectory`] if this path is not a directory;
    /// otherwise propagates the first permission-change failure.
    #[cfg(unix)]
    pub fn chmod_recurse(&self, mode: u32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        self.require_dir()?;
        walk(&self.to_path_buf(), &mut |p| {
            fs::set_permissions(p, fs::Permissions::from_mode(mode))?;
            Ok(())
        })
    }

    /// Change unix ownership of this path.
    ///
    /// `None` leaves the corresponding id unchanged.
    ///
    /// # Errors
    ///
    /// Propagates the underlying ownership-change failure.
    #[cfg(unix)]
    pub fn chown(&self, uid: Option<u32>, gid: Option<u32>) -> Result<()> {
        std::os::unix::fs::chown(self.to_path_buf(), uid, gid)?;
        Ok(())
    }

    /// Change unix ownership of this directory and everything beneath it.
    ///
    /// # Errors
    ///
    /// [`Error::NotADirectory`] if this path is not a directory;
    /// otherwise propagates the first ownership-change failure.
    #[cfg(unix)]
    pub fn chown_recurse(&self, uid: Option<u32>, gid: Option<u32>) -> Result<()> {
        self.require_dir()?;
        walk(&self.to_path_buf(), &mut |p| {
            std::os::unix::fs::chown(p, uid, gid)?;
            Ok(())
        })
    }

    #[cfg(unix)]
    fn require_dir(&self) -> Result<()> {
        if self.is_dir() {
            Ok(())
        } else {
            Err(Error::NotADirectory {
                path: self.to_path_buf(),
            })
        }
    }
}

/// Apply `f` to `root` and every entry beneath it, depth-first.
#[cfg(unix)]
fn walk(root: &Path, f: &mut dyn FnMut(&Path) -> Result<()>) -> Result<()> {
    f(root)?;
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            walk(&path, f)?;
        } else {
            f(&path)?;
        }
    }
    Ok(())
}
