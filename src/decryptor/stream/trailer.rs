//! src/decryptor/stream/trailer.rs
//! Trailer verification: EOF marker, then authentication tag

use crate::consts::{AUTH_TAG_SIZE, PWS3_EOF_MARKER};
use crate::error::Psafe3Error;
use subtle::ConstantTimeEq;

/// Check the 16 bytes stored right before the tag.
///
/// # Errors
///
/// [`Psafe3Error::Format`] if they are not `PWS3-EOFPWS3-EOF`.
#[inline(always)]
pub fn verify_eof_marker(marker: &[u8]) -> Result<(), Psafe3Error> {
    if marker != PWS3_EOF_MARKER {
        return Err("EOF marker mismatch".into());
    }
    Ok(())
}

/// Check the marker, then compare the computed tag to the stored one in
/// constant time.
///
/// Both checks always run in this order; a file failing both reports the
/// marker.
///
/// # Errors
///
/// - [`Psafe3Error::Format`] - marker mismatch
/// - [`Psafe3Error::IntegrityFailure`] - tag mismatch
pub fn verify_trailer(
    marker: &[u8],
    computed: &[u8; AUTH_TAG_SIZE],
    stored: &[u8; AUTH_TAG_SIZE],
) -> Result<(), Psafe3Error> {
    verify_eof_marker(marker)?;

    if !bool::from(computed[..].ct_eq(&stored[..])) {
        tracing::debug!("authentication tag mismatch");
        return Err(Psafe3Error::IntegrityFailure {
            computed: *computed,
            stored: *stored,
        });
    }
    Ok(())
}
