//! Structured-format codecs keyed by extension.
//!
//! A fixed set of format tags maps to codec implementations behind a
//! common decode/encode capability. Dispatch happens on the tag, looked
//! up once from the value's extension; an unrecognized extension is a
//! typed [`Error::UnsupportedFormat`], never a stringly failure.
//!
//! The document type shared by all codecs is [`serde_json::Value`].

use serde_json::Value;

use crate::error::{Error, Result};
use crate::value::PathValue;

/// A recognized structured-data format.
///
/// # Examples
///
/// ```
/// use pathform::Format;
///
/// assert_eq!(Format::from_ext("JSON"), Some(Format::Json));
/// assert_eq!(Format::from_ext("yml"), Some(Format::Yaml));
/// assert_eq!(Format::from_ext("ini"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// JSON, extension `json`.
    Json,
    /// YAML, extensions `yaml` and `yml`.
    Yaml,
}

impl Format {
    /// Look up a format tag from an extension, case-insensitively.
    #[must_use]
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// The codec implementing this format.
    #[must_use]
    pub fn codec(self) -> &'static dyn Codec {
        match self {
            Self::Json => &JsonCodec,
            Self::Yaml => &YamlCodec,
        }
    }
}

/// Decode/encode capability shared by all format codecs.
pub trait Codec {
    /// Decode a byte stream into a document.
    ///
    /// # Errors
    ///
    /// Returns the codec's parse error.
    fn decode(&self, bytes: &[u8]) -> Result<Value>;

    /// Encode a document into bytes.
    ///
    /// # Errors
    ///
    /// Returns the codec's serialization error.
    fn encode(&self, value: &Value) -> Result<Vec<u8>>;
}

struct JsonCodec;

impl Codec for JsonCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Value> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(value)?)
    }
}

struct YamlCodec;

impl Codec for YamlCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Value> {
        Ok(serde_yaml::from_slice(bytes)?)
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        Ok(serde_yaml::to_string(value)?.into_bytes())
    }
}

impl PathValue {
    /// The format tag this value's extension selects, if any.
    #[must_use]
    pub fn format(&self) -> Option<Format> {
        self.ext().and_then(Format::from_ext)
    }

    /// Read and decode the file using the codec selected by the
    /// extension.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`] when the extension (or its absence)
    /// selects no codec; otherwise the read or decode failure.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pathform::PathValue;
    ///
    /// let v = PathValue::from_file("/srv/app/config.yaml").unwrap();
    /// let doc = v.read_value().unwrap();
    /// println!("{}", doc["server"]["port"]);
    /// ```
    pub fn read_value(&self) -> Result<Value> {
        self.dispatch()?.decode(&self.read_bytes()?)
    }

    /// Encode `value` with the codec selected by the extension and write
    /// it to the file.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`] when the extension selects no codec;
    /// otherwise the encode or write failure.
    pub fn write_value(&self, value: &Value) -> Result<()> {
        let bytes = self.dispatch()?.encode(value)?;
        self.write_bytes(&bytes)
    }

    fn dispatch(&self) -> Result<&'static dyn Codec> {
        self.format()
            .map(Format::codec)
            .ok_or_else(|| Error::UnsupportedFormat {
                ext: self.ext().unwrap_or_default().to_string(),
            })
    }
}
