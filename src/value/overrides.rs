//! Structural derivation: build a new value with selected fields replaced.
//!
//! [`Overrides`] is a builder naming the fields to replace; applying it via
//! [`PathValue::with`] is a pure data transform. The receiver is never
//! touched and no filesystem access occurs.

use crate::error::{Error, Result};
use crate::value::decompose::{normalize_ext, split_filename, ParseOptions};
use crate::value::types::PathValue;

/// A set of field replacements for [`PathValue::with`].
///
/// Each override is applied independently: supplying only `ext` preserves
/// `dirs` and `base` unchanged. The `filename` override replaces both
/// `base` and `ext` at once (splitting at the last dot); `dir` and `path`
/// re-run the parse step on the supplied string.
///
/// # Examples
///
/// ```
/// use pathform::{Overrides, PathValue};
///
/// let v = PathValue::from_file("/srv/report.json").unwrap();
/// let yaml = v.with(&Overrides::new().ext("yaml")).unwrap();
/// assert_eq!(yaml.path_str(), "/srv/report.yaml");
/// // The receiver is unchanged.
/// assert_eq!(v.path_str(), "/srv/report.json");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    dirs: Option<Vec<String>>,
    base: Option<String>,
    ext: Option<String>,
    filename: Option<String>,
    dir: Option<String>,
    path: Option<String>,
}

impl Overrides {
    /// Create an empty override set (applying it yields a plain copy).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the directory segments wholesale.
    #[must_use]
    pub fn dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirs = Some(dirs.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the base name. An empty string clears both base and
    /// extension (a value cannot hold an extension without a base).
    #[must_use]
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Replace the extension. A leading dot is stripped; an empty or
    /// blank value clears the extension.
    #[must_use]
    pub fn ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = Some(ext.into());
        self
    }

    /// Replace base and extension together from a full filename.
    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Replace the directory portion by re-parsing a directory string.
    #[must_use]
    pub fn dir(mut self, dir: impl Into<String>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Replace the whole value by re-parsing a full path string.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.dirs.is_none()
            && self.base.is_none()
            && self.ext.is_none()
            && self.filename.is_none()
            && self.dir.is_none()
            && self.path.is_none()
    }
}

impl PathValue {
    /// Derive a new value with the fields named in `overrides` replaced.
    ///
    /// This is a pure transform: the receiver is unchanged, and no
    /// filesystem access occurs (the `dir`/`path` overrides re-parse with
    /// explicit kind hints, so no probe runs).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if a replacement directory segment
    /// contains a separator or is empty, if an extension override carries
    /// a dot or separator, if a `dir`/`path` string fails to parse, or if
    /// an extension is assigned while the value has no base name (an
    /// extension without a base is not representable).
    ///
    /// # Examples
    ///
    /// ```
    /// use pathform::{Overrides, PathValue};
    ///
    /// let v = PathValue::from_file("/data/in/frame.png").unwrap();
    /// let out = v
    ///     .with(&Overrides::new().dir("/data/out").filename("frame.webp"))
    ///     .unwrap();
    /// assert_eq!(out.path_str(), "/data/out/frame.webp");
    /// ```
    pub fn with(&self, overrides: &Overrides) -> Result<Self> {
        let mut next = if let Some(path) = &overrides.path {
            let opts = if path.ends_with('/') {
                ParseOptions::dir()
            } else {
                ParseOptions::file()
            };
            opts.relative(self.is_relative()).parse(path)?
        } else {
            self.clone()
        };

        if let Some(dir) = &overrides.dir {
            let parsed = ParseOptions::dir().relative(self.is_relative()).parse(dir)?;
            next.dirs = parsed.dirs;
            next.relativity = parsed.relativity;
        }

        if let Some(dirs) = &overrides.dirs {
            for seg in dirs {
                if seg.is_empty() || seg.contains('/') {
                    return Err(Error::InvalidInput {
                        input: seg.clone(),
                        reason: "directory segment must be non-empty and separator-free"
                            .to_string(),
                    });
                }
            }
            next.dirs = dirs.clone();
        }

        if let Some(filename) = &overrides.filename {
            let (base, ext) = split_filename(filename);
            next.base = base;
            next.ext = ext;
        }

        if let Some(base) = &overrides.base {
            if base.is_empty() {
                next.base = None;
                next.ext = None;
            } else if base.contains('/') {
                return Err(Error::InvalidInput {
                    input: base.clone(),
                    reason: "base name must not contain a separator".to_string(),
                });
            } else {
                next.base = Some(base.clone());
            }
        }

        if let Some(ext) = &overrides.ext {
            if next.base.is_none() {
                return Err(Error::InvalidInput {
                    input: ext.clone(),
                    reason: "cannot assign an extension to a value with no base name"
                        .to_string(),
                });
            }
            next.ext = normalize_ext(ext)?;
        }

        Ok(next)
    }
}
