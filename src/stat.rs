//! Lazily memoized stat fields with explicit invalidation.
//!
//! The first stat-field accessor populates a per-instance metadata cache;
//! later accessors read from it. The cache is never invalidated
//! automatically, since there is no portable change-notification
//! primitive to build that on; callers needing fresh values ask for
//! [`PathValue::reload`] or clear with [`PathValue::reset`].
//!
//! The cache lives in a `RefCell`, which makes [`PathValue`] `!Sync`;
//! the type is for single-owner use and does no internal locking.

use std::fs;
use std::time::SystemTime;

use crate::error::{Error, Result};
use crate::value::PathValue;

impl PathValue {
    /// The memoized metadata, populated on first use.
    ///
    /// # Errors
    ///
    /// Propagates the underlying stat failure (for instance when the path
    /// does not exist).
    pub fn metadata(&self) -> Result<fs::Metadata> {
        if let Some(meta) = self.stat.borrow().as_ref() {
            return Ok(meta.clone());
        }
        let meta = fs::metadata(self.to_path_buf())?;
        *self.stat.borrow_mut() = Some(meta.clone());
        Ok(meta)
    }

    /// Re-stat the path and replace the cached metadata.
    ///
    /// # Errors
    ///
    /// Propagates the underlying stat failure; on failure the previous
    /// cache contents are left in place.
    pub fn reload(&self) -> Result<()> {
        let meta = fs::metadata(self.to_path_buf())?;
        *self.stat.borrow_mut() = Some(meta);
        Ok(())
    }

    /// Drop the cached metadata without re-statting.
    pub fn reset(&self) {
        *self.stat.borrow_mut() = None;
    }

    /// File size in bytes, from the memoized stat.
    ///
    /// # Errors
    ///
    /// Propagates the underlying stat failure.
    pub fn size(&self) -> Result<u64> {
        Ok(self.metadata()?.len())
    }

    /// Last modification time, from the memoized stat.
    ///
    /// # Errors
    ///
    /// Propagates the underlying stat failure.
    pub fn mtime(&self) -> Result<SystemTime> {
        Ok(self.metadata()?.modified()?)
    }

    /// Last access time, from the memoized stat.
    ///
    /// # Errors
    ///
    /// Propagates the underlying stat failure.
    pub fn atime(&self) -> Result<SystemTime> {
        Ok(self.metadata()?.accessed()?)
    }

    /// Unix permission bits, from the memoized stat.
    ///
    /// # Errors
    ///
    /// Propagates the underlying stat failure.
    #[cfg(unix)]
    pub fn mode(&self) -> Result<u32> {
        use std::os::unix::fs::MetadataExt;
        Ok(self.metadata()?.mode())
    }

    /// Inode change time in seconds since the epoch, from the memoized
    /// stat.
    ///
    /// # Errors
    ///
    /// Propagates the underlying stat failure.
    #[cfg(unix)]
    pub fn ctime(&self) -> Result<i64> {
        use std::os::unix::fs::MetadataExt;
        Ok(self.metadata()?.ctime())
    }

    /// Numeric owner uid, from the memoized stat.
    ///
    /// # Errors
    ///
    /// Propagates the underlying stat failure.
    #[cfg(unix)]
    pub fn uid(&self) -> Result<u32> {
        use std::os::unix::fs::MetadataExt;
        Ok(self.metadata()?.uid())
    }

    /// Numeric group gid, from the memoized stat.
    ///
    /// # Errors
    ///
    /// Propagates the underlying stat failure.
    #[cfg(unix)]
    pub fn gid(&self) -> Result<u32> {
        use std::os::unix::fs::MetadataExt;
        Ok(self.metadata()?.gid())
    }

    /// Owner *name* lookup.
    ///
    /// # Errors
    ///
    /// Always fails with [`Error::Stubbed`]: resolving a uid to an account
    /// name needs a passwd database lookup this crate does not carry.
    /// [`uid`](Self::uid) provides the numeric owner.
    pub fn owner_name(&self) -> Result<String> {
        Err(Error::Stubbed {
            operation: "owner name lookup".to_string(),
        })
    }
}
