//! Container reader: the raw file bytes split into their byte-exact regions.
//!
//! ```text
//! [ "PWS3" ][ header: 148 ][ ciphertext body ][ "PWS3-EOFPWS3-EOF" ][ HMAC: 32 ]
//! ```

use std::fs;
use std::path::Path;

use crate::consts::{
    AUTH_TAG_SIZE, HEADER_SIZE, MIN_CONTAINER_SIZE, PWS3_EOF_MARKER, PWS3_TAG, TAG_SIZE,
};
use crate::error::Psafe3Error;
use crate::header::Header;

/// An encrypted vault held in memory, with its header already parsed.
///
/// Nothing here is secret: the bytes are exactly what sits on disk.
#[derive(Debug, Clone)]
pub struct Container {
    bytes: Vec<u8>,
    header: Header,
}

impl Container {
    /// Validate the minimum size and the tag, then parse the header.
    ///
    /// The body length is *not* checked here; the body decryptor owns that
    /// precondition.
    ///
    /// # Errors
    ///
    /// - [`Psafe3Error::Format`] - too short to hold tag, header and trailer, or bad tag
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Psafe3Error> {
        if bytes.len() < MIN_CONTAINER_SIZE {
            return Err(Psafe3Error::Format(format!(
                "truncated container: {} bytes, need at least {MIN_CONTAINER_SIZE}",
                bytes.len()
            )));
        }
        if &bytes[..TAG_SIZE] != PWS3_TAG {
            return Err(Psafe3Error::Format(
                "Not a Password Safe v3 file: invalid tag".into(),
            ));
        }
        let header = Header::parse(&bytes[TAG_SIZE..])?;
        tracing::debug!(
            size = bytes.len(),
            iterations = header.iterations,
            "parsed container header"
        );
        Ok(Self { bytes, header })
    }

    /// Read a whole file and parse it as a container.
    ///
    /// # Errors
    ///
    /// - [`Psafe3Error::Io`] - the file cannot be read
    /// - [`Psafe3Error::Format`] - see [`Container::from_bytes`]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Psafe3Error> {
        Self::from_bytes(fs::read(path)?)
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Total container size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Ciphertext between the header and the trailer.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.bytes[TAG_SIZE + HEADER_SIZE..self.trailer_start()]
    }

    /// The 16 bytes where the EOF marker should be.
    #[must_use]
    pub fn eof_marker(&self) -> &[u8] {
        let start = self.trailer_start();
        &self.bytes[start..start + PWS3_EOF_MARKER.len()]
    }

    /// The stored 32-byte authentication tag.
    #[must_use]
    pub fn stored_tag(&self) -> [u8; AUTH_TAG_SIZE] {
        let mut tag = [0u8; AUTH_TAG_SIZE];
        tag.copy_from_slice(&self.bytes[self.bytes.len() - AUTH_TAG_SIZE..]);
        tag
    }

    fn trailer_start(&self) -> usize {
        self.bytes.len() - AUTH_TAG_SIZE - PWS3_EOF_MARKER.len()
    }
}
