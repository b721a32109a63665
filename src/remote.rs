//! The remote (URL-backed) path variant.
//!
//! A [`RemotePath`] wraps a parsed URL and reuses the crate's
//! decomposition for the URL's path component only. Local and remote
//! values share one sum type, [`AnyPath`], which exposes exactly the
//! operations both variants can honestly support: string form, filename
//! accessors, join, and read. Filesystem mutation is simply not part of
//! the remote surface, so there is nothing to forbid at runtime.
//!
//! Reads go through a [`SchemeRegistry`], a caller-owned mapping from URL
//! scheme to reader; an unregistered scheme is a typed
//! [`Error::UnsupportedScheme`].

use std::collections::HashMap;
use std::fmt;
use std::fs;

use url::Url;

use crate::error::{Error, Result};
use crate::value::{ParseOptions, PathValue};

/// A path value backed by a URL rather than the local filesystem.
///
/// The URL's path component is decomposed with the same rules as local
/// values, so `dirs`/`base`/`ext` accessors behave identically. The
/// decomposition is pure: constructing a remote value never probes
/// anything.
///
/// # Examples
///
/// ```
/// use pathform::RemotePath;
///
/// let r = RemotePath::parse("https://example.com/releases/app-1.2.tar.gz?arch=x86").unwrap();
/// assert_eq!(r.scheme(), "https");
/// assert_eq!(r.host(), Some("example.com"));
/// assert_eq!(r.value().base(), Some("app-1.2.tar"));
/// assert_eq!(r.value().ext(), Some("gz"));
/// assert_eq!(r.query(), Some("arch=x86"));
/// ```
#[derive(Debug, Clone)]
pub struct RemotePath {
    url: Url,
    value: PathValue,
}

impl RemotePath {
    /// Parse a URL string into a remote path value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Url`] for an unparseable URL or
    /// [`Error::InvalidInput`] if its path component cannot be
    /// decomposed.
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw)?;
        let value = decompose_url_path(&url)?;
        Ok(Self { url, value })
    }

    /// The URL scheme, lowercased.
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// The URL host, when present.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    /// The URL port, when present.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.url.port()
    }

    /// The raw query string, when present.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }

    /// The decomposition of the URL's path component.
    #[must_use]
    pub fn value(&self) -> &PathValue {
        &self.value
    }

    /// The underlying URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The full URL string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Join a relative segment onto the URL path, re-decomposing the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Url`] if the join is invalid for this URL or
    /// [`Error::InvalidInput`] if the new path cannot be decomposed.
    pub fn join(&self, segment: &str) -> Result<Self> {
        let url = self.url.join(segment)?;
        let value = decompose_url_path(&url)?;
        Ok(Self { url, value })
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Decompose a URL's path component with the local splitting rules.
fn decompose_url_path(url: &Url) -> Result<PathValue> {
    let path = url.path();
    let opts = if path.ends_with('/') || path == "/" || path.is_empty() {
        ParseOptions::dir()
    } else {
        ParseOptions::file()
    };
    let normalized = if path.is_empty() { "/" } else { path };
    opts.parse(normalized)
}

/// Reads bytes for one URL scheme.
pub trait SchemeReader {
    /// Fetch the resource the URL names.
    ///
    /// # Errors
    ///
    /// Returns the reader's transport or decode failure.
    fn read(&self, url: &Url) -> Result<Vec<u8>>;
}

/// A caller-owned mapping from URL scheme to reader.
///
/// # Examples
///
/// ```
/// use pathform::{RemotePath, SchemeRegistry};
///
/// let registry = SchemeRegistry::with_defaults();
/// let r = RemotePath::parse("https://example.com/data.json").unwrap();
/// // No http reader is registered by default.
/// assert!(registry.read(&r).is_err());
/// ```
#[derive(Default)]
pub struct SchemeRegistry {
    readers: HashMap<String, Box<dyn SchemeReader>>,
}

impl SchemeRegistry {
    /// An empty registry: every read fails with
    /// [`Error::UnsupportedScheme`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in `file` reader registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("file", Box::new(FileReader));
        registry
    }

    /// Register (or replace) the reader for a scheme.
    pub fn register(&mut self, scheme: &str, reader: Box<dyn SchemeReader>) {
        self.readers.insert(scheme.to_ascii_lowercase(), reader);
    }

    /// Whether a reader is registered for `scheme`.
    #[must_use]
    pub fn supports(&self, scheme: &str) -> bool {
        self.readers.contains_key(&scheme.to_ascii_lowercase())
    }

    /// Read the resource a remote path names, through its scheme's
    /// reader.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedScheme`] if no reader is registered for the
    /// scheme, otherwise the reader's own failure.
    pub fn read(&self, remote: &RemotePath) -> Result<Vec<u8>> {
        let reader = self
            .readers
            .get(remote.scheme())
            .ok_or_else(|| Error::UnsupportedScheme {
                scheme: remote.scheme().to_string(),
            })?;
        reader.read(remote.url())
    }
}

impl fmt::Debug for SchemeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut schemes: Vec<_> = self.readers.keys().collect();
        schemes.sort();
        f.debug_struct("SchemeRegistry").field("schemes", &schemes).finish()
    }
}

/// Built-in reader for `file://` URLs, backed by the local filesystem.
struct FileReader;

impl SchemeReader for FileReader {
    fn read(&self, url: &Url) -> Result<Vec<u8>> {
        let path = url.to_file_path().map_err(|()| Error::InvalidInput {
            input: url.as_str().to_string(),
            reason: "file URL has no usable local path".to_string(),
        })?;
        Ok(fs::read(path)?)
    }
}

/// A path value of either variant: local-filesystem-backed or
/// remote-URL-backed.
///
/// The shared surface is the capability set both variants honestly
/// support. Operations implying local filesystem writes exist only on
/// [`PathValue`] itself.
///
/// # Examples
///
/// ```
/// use pathform::{AnyPath, PathValue, RemotePath};
///
/// let local = AnyPath::Local(PathValue::from_file("/srv/feed.json").unwrap());
/// let remote = AnyPath::Remote(RemotePath::parse("https://host/feed.json").unwrap());
///
/// assert_eq!(local.ext(), Some("json"));
/// assert_eq!(remote.ext(), Some("json"));
/// ```
#[derive(Debug, Clone)]
pub enum AnyPath {
    /// A local filesystem path.
    Local(PathValue),
    /// A remote URL path.
    Remote(RemotePath),
}

impl AnyPath {
    /// The recomposed filename of the final path component, if any.
    #[must_use]
    pub fn filename(&self) -> Option<String> {
        match self {
            Self::Local(v) => v.filename(),
            Self::Remote(r) => r.value().filename(),
        }
    }

    /// The extension of the final path component, if any.
    #[must_use]
    pub fn ext(&self) -> Option<&str> {
        match self {
            Self::Local(v) => v.ext(),
            Self::Remote(r) => r.value().ext(),
        }
    }

    /// Join a relative segment, staying in the same variant.
    ///
    /// # Errors
    ///
    /// Propagates the variant's join failure.
    pub fn join(&self, segment: &str) -> Result<Self> {
        Ok(match self {
            Self::Local(v) => Self::Local(v.join(segment)?),
            Self::Remote(r) => Self::Remote(r.join(segment)?),
        })
    }

    /// Read the resource's bytes: directly from the filesystem for the
    /// local variant, through `registry` for the remote one.
    ///
    /// # Errors
    ///
    /// Propagates the read failure, or
    /// [`Error::UnsupportedScheme`] for an unregistered remote scheme.
    pub fn read(&self, registry: &SchemeRegistry) -> Result<Vec<u8>> {
        match self {
            Self::Local(v) => v.read_bytes(),
            Self::Remote(r) => registry.read(r),
        }
    }
}

impl fmt::Display for AnyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(v) => v.fmt(f),
            Self::Remote(r) => r.fmt(f),
        }
    }
}
