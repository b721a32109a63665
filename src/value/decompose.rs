//! Path string decomposition.
//!
//! This module turns raw path strings into [`PathValue`]s:
//! - expanding tilde (~) to the home directory
//! - converting relative strings to absolute form against the current
//!   directory (unless relative parsing is requested)
//! - resolving `.` and `..` components so stored segments are canonical
//! - splitting the filename into base and extension at its last dot
//!
//! Parsing is configured through [`ParseOptions`], which carries the type
//! hints described by the construction contract: a `file` hint forces
//! filename-splitting even for nonexistent targets, a `dir` hint forces
//! directory-only interpretation, and with no hint a filesystem probe
//! decides.

use std::env;
use std::fs;

use crate::error::{Error, Result};
use crate::value::types::{PathValue, Relativity, ASCENT};

/// Type hint for string parsing.
///
/// # Examples
///
/// ```
/// use pathform::{NodeKind, ParseOptions};
///
/// let opts = ParseOptions::new().kind(NodeKind::File);
/// let v = opts.parse("/spool/job.ps").unwrap();
/// assert_eq!(v.ext(), Some("ps"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Interpret the final component as a filename.
    File,
    /// Interpret the whole string as a directory.
    Dir,
}

/// Builder-style options for [`PathValue`] parsing.
///
/// # Examples
///
/// ```
/// use pathform::ParseOptions;
///
/// // Relative parsing keeps segments unanchored and touches neither the
/// // filesystem nor the current directory.
/// let v = ParseOptions::file().relative(true).parse("pkg/lib.rs").unwrap();
/// assert_eq!(v.path_str(), "pkg/lib.rs");
/// assert!(v.is_relative());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    kind: Option<NodeKind>,
    relative: bool,
    relative_to: Option<PathValue>,
}

impl ParseOptions {
    /// Create options with no hints: the filesystem probe decides whether
    /// the final component is a filename.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for options with a [`NodeKind::File`] hint.
    #[must_use]
    pub fn file() -> Self {
        Self::new().kind(NodeKind::File)
    }

    /// Shorthand for options with a [`NodeKind::Dir`] hint.
    #[must_use]
    pub fn dir() -> Self {
        Self::new().kind(NodeKind::Dir)
    }

    /// Declare the type of the final component, skipping the probe.
    #[must_use]
    pub fn kind(mut self, kind: NodeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Parse relatively: keep the segments unanchored instead of
    /// expanding them against the current directory.
    #[must_use]
    pub fn relative(mut self, relative: bool) -> Self {
        self.relative = relative;
        self
    }

    /// Re-express the parsed value against `anchor` once parsed, via the
    /// relative-path algorithm.
    #[must_use]
    pub fn relative_to(mut self, anchor: PathValue) -> Self {
        self.relative_to = Some(anchor);
        self
    }

    /// Parse `raw` into a [`PathValue`] under these options.
    ///
    /// A trailing separator always forces directory-only interpretation,
    /// regardless of hints or existence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `raw` is empty, is rooted while
    /// relative parsing was requested, uses `~user` syntax, or ascends
    /// past the root.
    pub fn parse(&self, raw: &str) -> Result<PathValue> {
        if raw.is_empty() {
            return Err(Error::InvalidInput {
                input: raw.to_string(),
                reason: "empty path string".to_string(),
            });
        }
        if self.relative && raw.starts_with('/') {
            return Err(Error::InvalidInput {
                input: raw.to_string(),
                reason: "rooted path cannot be parsed as relative".to_string(),
            });
        }

        let kind = self.effective_kind(raw);
        let (dir_part, leaf) = split_leaf(raw, kind);

        let (dirs, relativity) = if self.relative {
            (relative_segments(dir_part, raw)?, Relativity::Relative)
        } else {
            (absolute_segments(dir_part, raw)?, Relativity::Absolute)
        };

        let (base, ext) = match leaf {
            Some(name) => split_filename(name),
            None => (None, None),
        };

        let parsed = PathValue::from_parts(dirs, base, ext, relativity);
        match &self.relative_to {
            Some(anchor) => Ok(parsed.relative_to(anchor)),
            None => Ok(parsed),
        }
    }

    /// Decide file-vs-dir: trailing separator wins, then the hint, then a
    /// filesystem probe (existing directory reads as dir, anything else
    /// as file).
    fn effective_kind(&self, raw: &str) -> NodeKind {
        if raw.ends_with('/') {
            return NodeKind::Dir;
        }
        if let Some(kind) = self.kind {
            return kind;
        }
        let probe_target = if raw.starts_with('~') {
            expand_tilde(raw, raw).unwrap_or_else(|_| raw.to_string())
        } else {
            raw.to_string()
        };
        match fs::metadata(&probe_target) {
            Ok(meta) if meta.is_dir() => NodeKind::Dir,
            Ok(_) => NodeKind::File,
            Err(_) => {
                log::debug!("probe of nonexistent path {raw:?}; assuming file");
                NodeKind::File
            }
        }
    }
}

/// Split `raw` into a directory portion and an optional leaf name.
fn split_leaf(raw: &str, kind: NodeKind) -> (&str, Option<&str>) {
    if kind == NodeKind::Dir {
        return (raw, None);
    }
    let (dir_part, leaf) = match raw.rfind('/') {
        Some(0) => ("/", &raw[1..]),
        Some(i) => (&raw[..i], &raw[i + 1..]),
        None => ("", raw),
    };
    // A dot leaf is directory syntax, never a filename.
    if leaf.is_empty() || leaf == "." || leaf == ASCENT {
        (raw, None)
    } else {
        (dir_part, Some(leaf))
    }
}

/// Expand a directory string to canonical absolute segments.
fn absolute_segments(dir_part: &str, input: &str) -> Result<Vec<String>> {
    let expanded = expand_tilde(dir_part, input)?;
    let anchored = if expanded.starts_with('/') {
        expanded
    } else {
        let cwd = current_dir_string(input)?;
        if expanded.is_empty() {
            cwd
        } else {
            format!("{cwd}/{expanded}")
        }
    };

    let mut dirs = Vec::new();
    for seg in anchored.split('/').filter(|s| !s.is_empty()) {
        match seg {
            "." => {}
            ASCENT => {
                if dirs.pop().is_none() {
                    // Already at root - can't go up further
                    return Err(Error::InvalidInput {
                        input: input.to_string(),
                        reason: "path contains too many '..' components (escapes root)"
                            .to_string(),
                    });
                }
            }
            other => dirs.push(other.to_string()),
        }
    }
    Ok(dirs)
}

/// Canonicalize a directory string without anchoring it: `.` drops,
/// interior `..` folds onto a preceding segment, leading `..` survives.
fn relative_segments(dir_part: &str, _input: &str) -> Result<Vec<String>> {
    let mut dirs: Vec<String> = Vec::new();
    for seg in dir_part.split('/').filter(|s| !s.is_empty()) {
        match seg {
            "." => {}
            ASCENT => match dirs.last() {
                Some(last) if last != ASCENT => {
                    dirs.pop();
                }
                _ => dirs.push(ASCENT.to_string()),
            },
            other => dirs.push(other.to_string()),
        }
    }
    Ok(dirs)
}

/// Expand tilde (~) to the home directory.
///
/// Handles `~` and `~/path`; `~user` syntax is not supported.
fn expand_tilde(dir_part: &str, input: &str) -> Result<String> {
    if !dir_part.starts_with('~') {
        return Ok(dir_part.to_string());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidInput {
        input: input.to_string(),
        reason: "cannot determine home directory".to_string(),
    })?;
    let home = home.to_str().ok_or_else(|| Error::InvalidInput {
        input: input.to_string(),
        reason: "home directory is not valid UTF-8".to_string(),
    })?;

    if dir_part == "~" {
        Ok(home.to_string())
    } else if let Some(rest) = dir_part.strip_prefix("~/") {
        Ok(format!("{home}/{rest}"))
    } else {
        Err(Error::InvalidInput {
            input: input.to_string(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

fn current_dir_string(input: &str) -> Result<String> {
    let cwd = env::current_dir().map_err(|e| Error::InvalidInput {
        input: input.to_string(),
        reason: format!("cannot get current directory: {e}"),
    })?;
    cwd.to_str()
        .map(ToString::to_string)
        .ok_or_else(|| Error::InvalidInput {
            input: input.to_string(),
            reason: "current directory is not valid UTF-8".to_string(),
        })
}

/// Split a filename at its last dot.
///
/// A lone leading dot is not an extension separator: `.bashrc` keeps its
/// dot in the base. A trailing dot likewise stays in the base.
pub(crate) fn split_filename(name: &str) -> (Option<String>, Option<String>) {
    if name.is_empty() {
        return (None, None);
    }
    match name.rfind('.') {
        Some(i) if i > 0 && i + 1 < name.len() => {
            (Some(name[..i].to_string()), Some(name[i + 1..].to_string()))
        }
        _ => (Some(name.to_string()), None),
    }
}

/// Normalize an extension assignment: strip one leading dot, clear blanks
/// to absent, reject separators.
pub(crate) fn normalize_ext(raw: &str) -> Result<Option<String>> {
    let trimmed = raw.strip_prefix('.').unwrap_or(raw).trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.contains('.') || trimmed.contains('/') {
        return Err(Error::InvalidInput {
            input: raw.to_string(),
            reason: "extension must not contain '.' or '/'".to_string(),
        });
    }
    Ok(Some(trimmed.to_string()))
}
