//! Media-type resolution: extension table, magic sniffing, true type.
//!
//! Two independent signals identify a file's media type: the extension
//! (a fixed table lookup) and the leading bytes ("magic" detection). The
//! true-type algorithm reconciles them: when the extension is one of the
//! sniffed type's known spellings the extension-derived type wins,
//! otherwise the sniffed type does.

use crate::error::Result;
use crate::value::PathValue;

/// How many leading bytes the sniffer needs at most.
const SNIFF_LEN: usize = 512;

/// The fixed extension-to-media-type table.
const TABLE: &[(&str, &str)] = &[
    ("txt", "text/plain"),
    ("log", "text/plain"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("xml", "application/xml"),
    ("json", "application/json"),
    ("yaml", "application/yaml"),
    ("yml", "application/yaml"),
    ("csv", "text/csv"),
    ("png", "image/png"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("gif", "image/gif"),
    ("pdf", "application/pdf"),
    ("gz", "application/gzip"),
    ("zip", "application/zip"),
    ("tar", "application/x-tar"),
    ("sh", "application/x-sh"),
];

/// Map an extension to its media type, case-insensitively.
///
/// # Examples
///
/// ```
/// use pathform::media::media_type_for_ext;
///
/// assert_eq!(media_type_for_ext("JPEG"), Some("image/jpeg"));
/// assert_eq!(media_type_for_ext("xyz"), None);
/// ```
#[must_use]
pub fn media_type_for_ext(ext: &str) -> Option<&'static str> {
    let lower = ext.to_ascii_lowercase();
    TABLE
        .iter()
        .find(|(e, _)| *e == lower)
        .map(|(_, media)| *media)
}

/// All known extension spellings for a media type, table order.
#[must_use]
pub fn extensions_for(media: &str) -> Vec<&'static str> {
    TABLE
        .iter()
        .filter(|(_, m)| *m == media)
        .map(|(e, _)| *e)
        .collect()
}

/// The preferred extension spelling for a media type: the longest (most
/// specific) among equally valid spellings.
///
/// # Examples
///
/// ```
/// use pathform::media::preferred_extension;
///
/// assert_eq!(preferred_extension("image/jpeg"), Some("jpeg"));
/// assert_eq!(preferred_extension("text/html"), Some("html"));
/// assert_eq!(preferred_extension("font/woff2"), None);
/// ```
#[must_use]
pub fn preferred_extension(media: &str) -> Option<&'static str> {
    extensions_for(media).into_iter().max_by_key(|e| e.len())
}

/// Identify a media type from a stream's leading bytes.
///
/// Falls back to `text/plain` for valid UTF-8 with no binary magic, and
/// reports nothing for unrecognized binary content.
///
/// # Examples
///
/// ```
/// use pathform::media::sniff;
///
/// assert_eq!(sniff(&[0x1f, 0x8b, 0x08]), Some("application/gzip"));
/// assert_eq!(sniff(b"%PDF-1.7"), Some("application/pdf"));
/// assert_eq!(sniff(b"plain words"), Some("text/plain"));
/// assert_eq!(sniff(&[0x00, 0x01, 0x02]), None);
/// ```
#[must_use]
pub fn sniff(head: &[u8]) -> Option<&'static str> {
    if head.is_empty() {
        return None;
    }
    if head.starts_with(&[0x1f, 0x8b]) {
        return Some("application/gzip");
    }
    if head.starts_with(b"PK\x03\x04") {
        return Some("application/zip");
    }
    if head.starts_with(&[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a]) {
        return Some("image/png");
    }
    if head.starts_with(&[0xff, 0xd8, 0xff]) {
        return Some("image/jpeg");
    }
    if head.starts_with(b"GIF87a") || head.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if head.starts_with(b"%PDF") {
        return Some("application/pdf");
    }
    if head.starts_with(b"#!") {
        return Some("application/x-sh");
    }
    // ustar magic sits at offset 257 in a tar header.
    if head.len() > 262 && &head[257..262] == b"ustar" {
        return Some("application/x-tar");
    }
    if head.starts_with(b"<?xml") {
        return Some("application/xml");
    }
    let trimmed = leading_text(head)?;
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("<!doctype html") || lower.starts_with("<html") {
        return Some("text/html");
    }
    Some("text/plain")
}

/// The head as text, if it decodes as NUL-free UTF-8 (ignoring a
/// truncated final character).
fn leading_text(head: &[u8]) -> Option<&str> {
    let text = match std::str::from_utf8(head) {
        Ok(s) => s,
        Err(e) if e.valid_up_to() > 0 && e.error_len().is_none() => {
            std::str::from_utf8(&head[..e.valid_up_to()]).ok()?
        }
        Err(_) => return None,
    };
    if text.contains('\0') {
        return None;
    }
    Some(text.trim_start())
}

/// Reconcile the extension-derived and sniffed media types.
///
/// When the extension is among the sniffed type's known spellings, the
/// two signals agree and the extension-derived type is preferred;
/// otherwise the sniffed content wins over the name.
///
/// # Examples
///
/// ```
/// use pathform::media::true_type;
///
/// // Extension corroborated by content.
/// assert_eq!(true_type(Some("jpg"), &[0xff, 0xd8, 0xff]), Some("image/jpeg"));
/// // Content contradicts the name: content wins.
/// assert_eq!(true_type(Some("txt"), &[0x1f, 0x8b]), Some("application/gzip"));
/// // Only one signal available.
/// assert_eq!(true_type(Some("png"), &[]), Some("image/png"));
/// ```
#[must_use]
pub fn true_type(ext: Option<&str>, head: &[u8]) -> Option<&'static str> {
    let ext_type = ext.and_then(media_type_for_ext);
    let sniffed = sniff(head);
    match (ext_type, sniffed) {
        (Some(from_ext), Some(from_bytes)) => {
            let ext_lower = ext.map(str::to_ascii_lowercase);
            let corroborated = ext_lower
                .as_deref()
                .is_some_and(|e| extensions_for(from_bytes).contains(&e));
            Some(if corroborated { from_ext } else { from_bytes })
        }
        (Some(t), None) | (None, Some(t)) => Some(t),
        (None, None) => None,
    }
}

impl PathValue {
    /// The media type named by this value's extension, if known.
    #[must_use]
    pub fn media_type(&self) -> Option<&'static str> {
        self.ext().and_then(media_type_for_ext)
    }

    /// The media type sniffed from the file's leading bytes.
    ///
    /// # Errors
    ///
    /// Propagates the underlying read failure.
    pub fn sniffed_media_type(&self) -> Result<Option<&'static str>> {
        Ok(sniff(&self.read_head()?))
    }

    /// The reconciled "true" media type of this file: extension when the
    /// content corroborates it, content otherwise.
    ///
    /// # Errors
    ///
    /// Propagates the underlying read failure.
    pub fn true_media_type(&self) -> Result<Option<&'static str>> {
        Ok(true_type(self.ext(), &self.read_head()?))
    }

    fn read_head(&self) -> Result<Vec<u8>> {
        use std::io::Read;
        let file = std::fs::File::open(self.to_path_buf())?;
        let mut head = Vec::with_capacity(SNIFF_LEN);
        file.take(SNIFF_LEN as u64).read_to_end(&mut head)?;
        Ok(head)
    }
}
