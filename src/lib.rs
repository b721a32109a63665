#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # pathform
//!
//! A library for working with paths as decomposed values.
//!
//! A [`PathValue`] holds a path already split into directory segments, an
//! optional base name, and an optional extension, so deriving a related
//! path (a different extension, base name, or directory) is a structural
//! transform rather than string surgery. Convenience
//! operations (existence and stat queries, content I/O, format codecs,
//! checksums, gzip, glob and PATH search) layer on top as thin wrappers
//! around the host OS.
//!
//! ## Core Types
//!
//! - [`PathValue`]: the decomposed path value and its transforms
//! - [`Overrides`]: field replacements for [`PathValue::with`]
//! - [`ParseOptions`] and [`NodeKind`]: hint-driven construction
//! - [`RemotePath`] and [`AnyPath`]: the URL-backed variant
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use pathform::{Overrides, PathValue};
//!
//! let v = PathValue::from_file("/var/log/app/archive.tar.gz").unwrap();
//! assert_eq!(v.base(), Some("archive.tar"));
//! assert_eq!(v.ext(), Some("gz"));
//!
//! // Derive without re-parsing; the receiver is unchanged.
//! let listing = v.with(&Overrides::new().filename("archive.lst")).unwrap();
//! assert_eq!(listing.path_str(), "/var/log/app/archive.lst");
//!
//! // Relative-path computation between decomposed values.
//! let anchor = PathValue::from_dir("/var/spool").unwrap();
//! assert_eq!(v.relative_to(&anchor).path_str(), "../log/app/archive.tar.gz");
//! ```

pub mod cwd;
pub mod error;
pub mod format;
pub mod io;
pub mod media;
pub mod ops;
pub mod stat;
pub mod value;

mod remote;

// Re-export key types at crate root for convenience
pub use cwd::{with_dir, DirStack};
pub use error::{Error, Result};
pub use format::{Codec, Format};
pub use io::ChecksumAlgorithm;
pub use remote::{AnyPath, RemotePath, SchemeReader, SchemeRegistry};
pub use value::{NodeKind, Overrides, ParseOptions, PathValue, Relativity};
