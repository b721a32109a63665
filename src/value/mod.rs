//! The decomposed path value and its structural transforms.
//!
//! A path string is split once into directory segments, an optional base
//! name, and an optional extension; every later derivation works on the
//! decomposition instead of re-parsing strings.
//!
//! # Key Concepts
//!
//! ## Decomposition
//!
//! [`PathValue::parse`] (and the hinted forms on [`ParseOptions`]) expand
//! the directory portion to canonical absolute segments, with tilde
//! expanded and `.`/`..` resolved, then split the filename at its last
//! dot. Dotfiles
//! such as `.bashrc` are not treated as having an extension.
//!
//! ## Derivation
//!
//! [`PathValue::with`] builds a new value with selected fields replaced
//! ([`Overrides`]); it never mutates the receiver and never touches the
//! filesystem.
//!
//! ## Relative paths
//!
//! [`PathValue::relative_to`] computes the ascend-then-descend route from
//! an anchor to the value; the result carries an explicit
//! [`Relativity::Relative`] tag.
//!
//! # Examples
//!
//! ```
//! use pathform::{Overrides, PathValue};
//!
//! let v = PathValue::from_file("/var/log/app/archive.tar.gz").unwrap();
//! assert_eq!(v.base(), Some("archive.tar"));
//!
//! let renamed = v.with(&Overrides::new().ext("zst")).unwrap();
//! assert_eq!(renamed.path_str(), "/var/log/app/archive.tar.zst");
//! ```

pub mod decompose;
mod overrides;
mod relative;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types
pub use decompose::{NodeKind, ParseOptions};
pub use overrides::Overrides;
pub use types::{PathValue, Relativity, ASCENT};
