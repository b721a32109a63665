//! Relative-path computation between two decomposed values.
//!
//! The algorithm finds the first index at which the two directory
//! sequences disagree, ascends out of the anchor's remaining segments,
//! then descends the target's tail. It assumes both values live in one
//! rooted tree; with no common prefix the result ascends all the way to
//! the root, which is correct there even if not minimal across
//! differently-rooted trees.
//!
//! The relation is not symmetric: `a.relative_to(b)` inverted is not in
//! general `b.relative_to(a)`.

use crate::error::Result;
use crate::value::decompose::ParseOptions;
use crate::value::types::{PathValue, Relativity, ASCENT};

impl PathValue {
    /// Compute this value's location relative to `anchor`.
    ///
    /// The result's directory sequence is the shortest ascend-then-descend
    /// route from the anchor to `self`; `base` and `ext` are copied from
    /// `self` unchanged, and the result is tagged [`Relativity::Relative`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pathform::PathValue;
    ///
    /// let target = PathValue::from_file("/usr/local/lib/pkg/libz.so").unwrap();
    /// let anchor = PathValue::from_dir("/usr/local/bin").unwrap();
    ///
    /// let rel = target.relative_to(&anchor);
    /// assert_eq!(rel.dirs(), ["..", "lib", "pkg"]);
    /// assert_eq!(rel.path_str(), "../lib/pkg/libz.so");
    /// ```
    #[must_use]
    pub fn relative_to(&self, anchor: &Self) -> Self {
        let mismatch = self
            .dirs
            .iter()
            .zip(anchor.dirs.iter())
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| self.dirs.len().min(anchor.dirs.len()));

        let ascents = anchor.dirs.len() - mismatch;
        let mut dirs = Vec::with_capacity(ascents + self.dirs.len() - mismatch);
        dirs.extend(std::iter::repeat(ASCENT.to_string()).take(ascents));
        dirs.extend(self.dirs[mismatch..].iter().cloned());

        Self::from_parts(dirs, self.base.clone(), self.ext.clone(), Relativity::Relative)
    }

    /// Compute this value's location relative to the process current
    /// directory, read fresh at call time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) if the
    /// current directory cannot be read or is not valid UTF-8.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pathform::PathValue;
    ///
    /// let v = PathValue::from_file("/srv/data/report.json").unwrap();
    /// let rel = v.relative().unwrap();
    /// assert!(rel.is_relative());
    /// ```
    pub fn relative(&self) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let cwd = cwd.to_string_lossy();
        let anchor = ParseOptions::dir().parse(&cwd)?;
        Ok(self.relative_to(&anchor))
    }
}
