//! Core types for decomposed path values.
//!
//! This module defines [`PathValue`], the central value type of the crate,
//! along with its accessors, string recomposition, equality and ordering,
//! and the structural parent/child relation.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::fs::Metadata;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::error::Result;
use crate::value::decompose::{split_filename, ParseOptions};

/// Whether a path value is rooted at the filesystem root or floats
/// relative to some anchor.
///
/// Relativity is an explicit tag carried by every [`PathValue`]. It is set
/// at construction and by [`PathValue::relative_to`], never inferred from
/// whether the first directory segment happens to be the ascent marker.
///
/// # Examples
///
/// ```
/// use pathform::{PathValue, Relativity};
///
/// let v = PathValue::from_file("/usr/local/bin/cc").unwrap();
/// assert_eq!(v.relativity(), Relativity::Absolute);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relativity {
    /// The value is rooted: its directory string begins with the separator.
    Absolute,
    /// The value floats relative to an anchor supplied by context.
    Relative,
}

/// The parent-directory ascent marker used in relative paths.
pub const ASCENT: &str = "..";

/// A decomposed path: directory segments, optional base name, optional
/// extension.
///
/// A `PathValue` holds a path already split into its structural parts, so
/// deriving a sibling path (swap the extension, rename the base, move to a
/// different directory) never re-parses a string. The string forms
/// ([`path_str`](Self::path_str), [`dir_str`](Self::dir_str),
/// [`filename`](Self::filename)) are recomposed on demand.
///
/// Structural invariants, upheld by every constructor and transform:
///
/// - no segment of `dirs` contains the path separator;
/// - `ext`, when present, is non-empty and contains no dot;
/// - `filename` is absent iff `base` is absent, and `ext` can only be
///   present when `base` is.
///
/// Cloning deep-copies the decomposition and starts with an empty stat
/// cache; copies never share mutable state. Equality, ordering, and
/// hashing all use the full path string.
///
/// The memoized stat cache makes this type `!Sync`; it is designed for
/// single-owner use and performs no internal locking.
///
/// # Examples
///
/// ```
/// use pathform::PathValue;
///
/// let v = PathValue::from_file("/var/log/app/archive.tar.gz").unwrap();
/// assert_eq!(v.dirs(), ["var", "log", "app"]);
/// assert_eq!(v.base(), Some("archive.tar"));
/// assert_eq!(v.ext(), Some("gz"));
/// assert_eq!(v.filename().as_deref(), Some("archive.tar.gz"));
/// assert_eq!(v.path_str(), "/var/log/app/archive.tar.gz");
/// ```
#[derive(Debug)]
pub struct PathValue {
    pub(crate) dirs: Vec<String>,
    pub(crate) base: Option<String>,
    pub(crate) ext: Option<String>,
    pub(crate) relativity: Relativity,
    pub(crate) stat: RefCell<Option<Metadata>>,
}

impl PathValue {
    /// Construct directly from decomposed parts, bypassing string parsing.
    pub(crate) fn from_parts(
        dirs: Vec<String>,
        base: Option<String>,
        ext: Option<String>,
        relativity: Relativity,
    ) -> Self {
        debug_assert!(dirs.iter().all(|d| !d.is_empty() && !d.contains('/')));
        debug_assert!(ext.is_none() || base.is_some());
        Self {
            dirs,
            base,
            ext,
            relativity,
            stat: RefCell::new(None),
        }
    }

    /// Parse a path string with default options (filesystem probe decides
    /// between file and directory interpretation).
    ///
    /// See [`ParseOptions`] for hint-driven parsing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) if the
    /// string is empty, uses unsupported tilde syntax, or ascends past the
    /// root.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pathform::PathValue;
    ///
    /// let v = PathValue::parse("./notes.md").unwrap();
    /// assert!(v.path_str().ends_with("notes.md"));
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        ParseOptions::new().parse(raw)
    }

    /// Parse a path string, forcing filename-splitting even if the target
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Same conditions as [`parse`](Self::parse).
    ///
    /// # Examples
    ///
    /// ```
    /// use pathform::PathValue;
    ///
    /// let v = PathValue::from_file("/downloads/photo.jpeg").unwrap();
    /// assert_eq!(v.base(), Some("photo"));
    /// assert_eq!(v.ext(), Some("jpeg"));
    /// ```
    pub fn from_file(raw: &str) -> Result<Self> {
        ParseOptions::file().parse(raw)
    }

    /// Parse a path string as a bare directory (no filename component).
    ///
    /// # Errors
    ///
    /// Same conditions as [`parse`](Self::parse).
    ///
    /// # Examples
    ///
    /// ```
    /// use pathform::PathValue;
    ///
    /// let v = PathValue::from_dir("/etc/ssh").unwrap();
    /// assert_eq!(v.dirs(), ["etc", "ssh"]);
    /// assert!(v.base().is_none());
    /// ```
    pub fn from_dir(raw: &str) -> Result<Self> {
        ParseOptions::dir().parse(raw)
    }

    /// The ordered directory segments.
    #[must_use]
    pub fn dirs(&self) -> &[String] {
        &self.dirs
    }

    /// The filename without its final extension, when present.
    #[must_use]
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// The extension without its leading dot, when present.
    #[must_use]
    pub fn ext(&self) -> Option<&str> {
        self.ext.as_deref()
    }

    /// The relativity tag of this value.
    #[must_use]
    pub fn relativity(&self) -> Relativity {
        self.relativity
    }

    /// Whether this value is rooted at the filesystem root.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.relativity == Relativity::Absolute
    }

    /// Whether this value floats relative to an anchor.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.relativity == Relativity::Relative
    }

    /// Whether the value begins with the parent-directory ascent marker.
    ///
    /// This reports ascent only. It says nothing about relativity, which
    /// is carried by the explicit [`Relativity`] tag.
    #[must_use]
    pub fn ascends(&self) -> bool {
        self.dirs.first().is_some_and(|d| d == ASCENT)
    }

    /// The recomposed filename: `base` alone, or `base.ext`.
    ///
    /// Absent exactly when `base` is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathform::PathValue;
    ///
    /// let v = PathValue::from_file("/home/alice/.bashrc").unwrap();
    /// assert_eq!(v.filename().as_deref(), Some(".bashrc"));
    ///
    /// let d = PathValue::from_dir("/home/alice").unwrap();
    /// assert!(d.filename().is_none());
    /// ```
    #[must_use]
    pub fn filename(&self) -> Option<String> {
        let base = self.base.as_deref()?;
        Some(match self.ext.as_deref() {
            Some(ext) => format!("{base}.{ext}"),
            None => base.to_string(),
        })
    }

    /// The directory portion as a string.
    ///
    /// Absolute values produce a rooted string (`/` for the root itself);
    /// relative values produce a separator-joined segment list, or `.`
    /// when there are no segments.
    #[must_use]
    pub fn dir_str(&self) -> String {
        let joined = self.dirs.join("/");
        match self.relativity {
            Relativity::Absolute => format!("/{joined}"),
            Relativity::Relative => {
                if joined.is_empty() {
                    ".".to_string()
                } else {
                    joined
                }
            }
        }
    }

    /// The full path string: directory portion joined with the filename.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathform::PathValue;
    ///
    /// let v = PathValue::from_file("/srv/data/report.json").unwrap();
    /// assert_eq!(v.path_str(), "/srv/data/report.json");
    ///
    /// let root = PathValue::from_dir("/").unwrap();
    /// assert_eq!(root.path_str(), "/");
    /// ```
    #[must_use]
    pub fn path_str(&self) -> String {
        match self.filename() {
            None => self.dir_str(),
            Some(name) => {
                let joined = self.dirs.join("/");
                match self.relativity {
                    Relativity::Absolute => format!("/{joined}{}{name}", sep_if(&joined)),
                    Relativity::Relative => {
                        if joined.is_empty() {
                            name
                        } else {
                            format!("{joined}/{name}")
                        }
                    }
                }
            }
        }
    }

    /// The full path as an owned [`PathBuf`], for handing to OS calls.
    #[must_use]
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(self.path_str())
    }

    /// Whether this value's directory is a proper prefix of `other`'s.
    ///
    /// The relation is purely structural: it compares directory segments
    /// and ignores filenames and the filesystem.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathform::PathValue;
    ///
    /// let etc = PathValue::from_dir("/etc").unwrap();
    /// let ssh = PathValue::from_dir("/etc/ssh").unwrap();
    /// let etc2 = PathValue::from_dir("/etc2/ssh").unwrap();
    ///
    /// assert!(etc.parent_of(&ssh));
    /// assert!(!etc.parent_of(&etc2));
    /// assert!(!etc.parent_of(&etc));
    /// ```
    #[must_use]
    pub fn parent_of(&self, other: &Self) -> bool {
        self.dirs.len() < other.dirs.len() && other.dirs[..self.dirs.len()] == self.dirs[..]
    }

    /// Whether `other`'s directory is a proper prefix of this value's.
    #[must_use]
    pub fn child_of(&self, other: &Self) -> bool {
        other.parent_of(self)
    }

    /// Append a relative child path, treating this value as a directory.
    ///
    /// If the receiver carries a filename, that filename becomes a
    /// directory segment of the result. The child's own filename (if any)
    /// is split into `base`/`ext` per the usual rule; ascent markers in
    /// the child fold onto the receiver's segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) if the
    /// child is empty, rooted, or ascends past this value's root.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathform::PathValue;
    ///
    /// let home = PathValue::from_dir("/home/alice").unwrap();
    /// let cfg = home.join("work/../notes/todo.txt").unwrap();
    /// assert_eq!(cfg.path_str(), "/home/alice/notes/todo.txt");
    /// ```
    pub fn join(&self, child: &str) -> Result<Self> {
        use crate::error::Error;

        if child.is_empty() {
            return Err(Error::InvalidInput {
                input: child.to_string(),
                reason: "cannot join an empty child path".to_string(),
            });
        }
        if child.starts_with('/') {
            return Err(Error::InvalidInput {
                input: child.to_string(),
                reason: "cannot join a rooted child path".to_string(),
            });
        }

        let dir_only = child.ends_with('/');
        let mut dirs = self.dirs.clone();
        if let Some(name) = self.filename() {
            dirs.push(name);
        }

        let trimmed = child.trim_end_matches('/');
        let mut segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        let leaf = if dir_only { None } else { segments.pop() };

        for seg in segments {
            fold_segment(&mut dirs, seg, child, self.relativity)?;
        }

        let (base, ext) = match leaf {
            Some(name) if name != "." && name != ASCENT => split_filename(name),
            Some(seg) => {
                fold_segment(&mut dirs, seg, child, self.relativity)?;
                (None, None)
            }
            None => (None, None),
        };

        Ok(Self::from_parts(dirs, base, ext, self.relativity))
    }
}

/// Fold one child segment onto an accumulated directory list.
fn fold_segment(
    dirs: &mut Vec<String>,
    seg: &str,
    input: &str,
    relativity: Relativity,
) -> Result<()> {
    use crate::error::Error;

    match seg {
        "." => {}
        ASCENT => match dirs.last() {
            Some(last) if last != ASCENT => {
                dirs.pop();
            }
            Some(_) => dirs.push(ASCENT.to_string()),
            None => {
                if relativity == Relativity::Absolute {
                    return Err(Error::InvalidInput {
                        input: input.to_string(),
                        reason: "child path ascends past the root".to_string(),
                    });
                }
                dirs.push(ASCENT.to_string());
            }
        },
        other => dirs.push(other.to_string()),
    }
    Ok(())
}

fn sep_if(joined: &str) -> &'static str {
    if joined.is_empty() {
        ""
    } else {
        "/"
    }
}

impl Clone for PathValue {
    /// Deep copy of the decomposition. The stat cache is not carried over;
    /// the copy starts cold.
    fn clone(&self) -> Self {
        Self {
            dirs: self.dirs.clone(),
            base: self.base.clone(),
            ext: self.ext.clone(),
            relativity: self.relativity,
            stat: RefCell::new(None),
        }
    }
}

impl fmt::Display for PathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_str())
    }
}

impl PartialEq for PathValue {
    fn eq(&self, other: &Self) -> bool {
        self.path_str() == other.path_str()
    }
}

impl Eq for PathValue {}

impl PartialOrd for PathValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path_str().cmp(&other.path_str())
    }
}

impl Hash for PathValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path_str().hash(state);
    }
}

impl Serialize for PathValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path_str())
    }
}

impl<'de> Deserialize<'de> for PathValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct PathVisitor;

        impl Visitor<'_> for PathVisitor {
            type Value = PathValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a path string")
            }

            fn visit_str<E: de::Error>(self, s: &str) -> std::result::Result<PathValue, E> {
                // Re-parse purely: kind from the trailing separator,
                // relativity from the leading one, no filesystem probe.
                let opts = if s.ends_with('/') {
                    ParseOptions::dir()
                } else {
                    ParseOptions::file()
                };
                let opts = if s.starts_with('/') {
                    opts
                } else {
                    opts.relative(true)
                };
                opts.parse(s).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(PathVisitor)
    }
}
