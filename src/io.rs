//! Content I/O: plain reads and writes, gzip wrap/unwrap, checksums.
//!
//! These are pass-throughs to the host filesystem plus two external
//! codecs: flate2 for the gzip-compatible stream wrapper and the
//! sha2/md5 digests for content checksums.

use std::fmt::Write as _;
use std::fs;
use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::value::PathValue;

/// Content-digest algorithm selector for [`PathValue::checksum`].
///
/// # Examples
///
/// ```no_run
/// use pathform::{ChecksumAlgorithm, PathValue};
///
/// let v = PathValue::from_file("/srv/release.tar.gz").unwrap();
/// let digest = v.checksum(ChecksumAlgorithm::Sha256).unwrap();
/// assert_eq!(digest.len(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumAlgorithm {
    /// MD5, 32 hex characters.
    Md5,
    /// SHA-256, 64 hex characters.
    Sha256,
}

impl PathValue {
    /// Read the file's entire contents as bytes.
    ///
    /// # Errors
    ///
    /// Propagates the underlying read failure.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(fs::read(self.to_path_buf())?)
    }

    /// Read the file's entire contents as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Propagates the underlying read failure (including invalid UTF-8).
    pub fn read_string(&self) -> Result<String> {
        Ok(fs::read_to_string(self.to_path_buf())?)
    }

    /// Read the file as UTF-8 text split into lines, line endings
    /// stripped.
    ///
    /// # Errors
    ///
    /// Propagates the underlying read failure.
    pub fn read_lines(&self) -> Result<Vec<String>> {
        Ok(self.read_string()?.lines().map(ToString::to_string).collect())
    }

    /// Write `bytes` to the file, replacing any existing contents.
    ///
    /// # Errors
    ///
    /// Propagates the underlying write failure.
    pub fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        fs::write(self.to_path_buf(), bytes)?;
        Ok(())
    }

    /// Write `text` to the file, replacing any existing contents.
    ///
    /// # Errors
    ///
    /// Propagates the underlying write failure.
    pub fn write_string(&self, text: &str) -> Result<()> {
        self.write_bytes(text.as_bytes())
    }

    /// Append `text` to the file, creating it if missing.
    ///
    /// # Errors
    ///
    /// Propagates the underlying open or write failure.
    pub fn append_string(&self, text: &str) -> Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.to_path_buf())?;
        file.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Read the file through a gzip decoder.
    ///
    /// # Errors
    ///
    /// Propagates the underlying read failure or a malformed gzip
    /// stream.
    pub fn read_gzip(&self) -> Result<Vec<u8>> {
        let file = fs::File::open(self.to_path_buf())?;
        let mut decoder = GzDecoder::new(file);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out)?;
        Ok(out)
    }

    /// Write `bytes` to the file through a gzip encoder.
    ///
    /// # Errors
    ///
    /// Propagates the underlying write failure.
    pub fn write_gzip(&self, bytes: &[u8]) -> Result<()> {
        let file = fs::File::create(self.to_path_buf())?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(bytes)?;
        encoder.finish()?;
        Ok(())
    }

    /// Compute a hex content digest of the file.
    ///
    /// # Errors
    ///
    /// Propagates the underlying read failure.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pathform::{ChecksumAlgorithm, PathValue};
    ///
    /// let v = PathValue::from_file("/etc/hostname").unwrap();
    /// let md5 = v.checksum(ChecksumAlgorithm::Md5).unwrap();
    /// assert_eq!(md5.len(), 32);
    /// ```
    pub fn checksum(&self, algorithm: ChecksumAlgorithm) -> Result<String> {
        let bytes = self.read_bytes()?;
        Ok(match algorithm {
            ChecksumAlgorithm::Md5 => format!("{:x}", md5::compute(&bytes)),
            ChecksumAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(&bytes);
                let mut hex = String::with_capacity(64);
                for byte in hasher.finalize() {
                    let _ = write!(hex, "{byte:02x}");
                }
                hex
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_in(dir: &tempfile::TempDir, name: &str) -> PathValue {
        PathValue::from_file(dir.path().join(name).to_str().unwrap()).unwrap()
    }

    #[test]
    fn test_write_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let v = value_in(&dir, "note.txt");

        v.write_string("alpha\nbeta\n").unwrap();
        assert_eq!(v.read_string().unwrap(), "alpha\nbeta\n");
        assert_eq!(v.read_lines().unwrap(), ["alpha", "beta"]);
        assert_eq!(v.read_bytes().unwrap(), b"alpha\nbeta\n");
    }

    #[test]
    fn test_append() {
        let dir = tempfile::tempdir().unwrap();
        let v = value_in(&dir, "log.txt");

        v.append_string("one\n").unwrap();
        v.append_string("two\n").unwrap();
        assert_eq!(v.read_lines().unwrap(), ["one", "two"]);
    }

    #[test]
    fn test_gzip_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let v = value_in(&dir, "blob.gz");

        let payload = b"compress me, twice over, compress me".repeat(20);
        v.write_gzip(&payload).unwrap();

        // The on-disk form is gzip (magic header), not the raw payload.
        let raw = v.read_bytes().unwrap();
        assert_eq!(&raw[..2], &[0x1f, 0x8b]);
        assert!(raw.len() < payload.len());

        assert_eq!(v.read_gzip().unwrap(), payload);
    }

    #[test]
    fn test_checksum_known_values() {
        let dir = tempfile::tempdir().unwrap();
        let v = value_in(&dir, "known.txt");
        v.write_string("hello").unwrap();

        assert_eq!(
            v.checksum(ChecksumAlgorithm::Md5).unwrap(),
            "5d41402abc4b2a76b9719d911017c592"
        );
        assert_eq!(
            v.checksum(ChecksumAlgorithm::Sha256).unwrap(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_read_missing_file_fails() {
        let v = PathValue::from_file("/no/such/file.txt").unwrap();
        assert!(v.read_bytes().is_err());
        assert!(v.checksum(ChecksumAlgorithm::Sha256).is_err());
    }
}
