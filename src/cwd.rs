//! Explicit current-directory stack and scoped directory changes.
//!
//! The process current directory is global state, but the bookkeeping for
//! changing it does not have to be: [`DirStack`] is an ordinary value the
//! caller owns, and [`with_dir`] restores the previous directory on every
//! exit path, early `?` returns and panics included, via a drop guard.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::value::{ParseOptions, PathValue};

/// A caller-owned stack of previous working directories.
///
/// [`pushd`](Self::pushd) changes the process directory and remembers the
/// old one; [`popd`](Self::popd) restores the most recent. Nothing here is
/// process-global beyond the OS cwd itself.
///
/// # Examples
///
/// ```no_run
/// use pathform::DirStack;
///
/// let mut stack = DirStack::new();
/// stack.pushd("/tmp").unwrap();
/// // ... work in /tmp ...
/// stack.popd().unwrap();
/// assert_eq!(stack.depth(), 0);
/// ```
#[derive(Debug, Default)]
pub struct DirStack {
    stack: Vec<PathBuf>,
}

impl DirStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many directories are remembered.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Change to `dir`, remembering the directory we left.
    ///
    /// # Errors
    ///
    /// Propagates the cwd read or change failure; on failure the stack is
    /// unchanged.
    pub fn pushd(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let previous = env::current_dir()?;
        env::set_current_dir(dir.as_ref())?;
        self.stack.push(previous);
        Ok(())
    }

    /// Return to the most recently remembered directory.
    ///
    /// Returns the directory restored to, or `None` if the stack was
    /// empty.
    ///
    /// # Errors
    ///
    /// Propagates the directory-change failure; the entry is only popped
    /// once the change succeeds.
    pub fn popd(&mut self) -> Result<Option<PathBuf>> {
        let Some(previous) = self.stack.last() else {
            return Ok(None);
        };
        env::set_current_dir(previous)?;
        Ok(self.stack.pop())
    }

    /// The process current directory as a path value.
    ///
    /// # Errors
    ///
    /// Propagates the cwd read failure or a non-UTF-8 cwd.
    pub fn current(&self) -> Result<PathValue> {
        let cwd = env::current_dir()?;
        ParseOptions::dir().parse(&cwd.to_string_lossy())
    }
}

/// Run `work` with the process directory changed to `dir`, restoring the
/// previous directory afterwards no matter how `work` exits.
///
/// # Errors
///
/// Propagates the directory change failure or `work`'s own error.
///
/// # Examples
///
/// ```no_run
/// use pathform::{with_dir, PathValue};
///
/// let listing = with_dir("/etc", || {
///     PathValue::from_dir(".")?.children()
/// }).unwrap();
/// assert!(!listing.is_empty());
/// ```
pub fn with_dir<T>(dir: impl AsRef<Path>, work: impl FnOnce() -> Result<T>) -> Result<T> {
    let previous = env::current_dir()?;
    env::set_current_dir(dir.as_ref())?;
    let _guard = RestoreCwd { previous };
    work()
}

/// Restores the saved directory when dropped.
struct RestoreCwd {
    previous: PathBuf,
}

impl Drop for RestoreCwd {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.previous) {
            log::warn!(
                "failed to restore working directory {}: {e}",
                self.previous.display()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::error::Error;

    // Mutates the process cwd: serialized against other cwd-sensitive
    // tests, and kept as a single test so the steps cannot interleave.
    #[test]
    #[serial(cwd)]
    fn test_stack_and_guard() {
        let origin = env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().canonicalize().unwrap();

        // pushd/popd round trip.
        let mut stack = DirStack::new();
        stack.pushd(&target).unwrap();
        assert_eq!(env::current_dir().unwrap(), target);
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current().unwrap().to_path_buf(), target);

        let restored = stack.popd().unwrap();
        assert_eq!(restored, Some(origin.clone()));
        assert_eq!(env::current_dir().unwrap(), origin);
        assert_eq!(stack.popd().unwrap(), None);

        // pushd failure leaves the stack alone.
        assert!(stack.pushd("/no/such/dir").is_err());
        assert_eq!(stack.depth(), 0);

        // with_dir restores on success.
        let seen = with_dir(&target, || Ok(env::current_dir()?)).unwrap();
        assert_eq!(seen, target);
        assert_eq!(env::current_dir().unwrap(), origin);

        // with_dir restores on error too.
        let failed: Result<()> = with_dir(&target, || {
            Err(Error::InvalidInput {
                input: String::new(),
                reason: "forced".to_string(),
            })
        });
        assert!(failed.is_err());
        assert_eq!(env::current_dir().unwrap(), origin);
    }
}
