//! # Constants
//!
//! Container layout sizes, markers, and limits for the Password Safe v3 format.

/// Leading 4-byte container tag.
pub const PWS3_TAG: &[u8; 4] = b"PWS3";

/// 16-byte ASCII marker stored right before the authentication tag.
pub const PWS3_EOF_MARKER: &[u8; 16] = b"PWS3-EOFPWS3-EOF";

/// Twofish block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Length of the leading container tag.
pub const TAG_SIZE: usize = 4;

/// Fixed header structure following the tag:
/// salt (32) + iterations (4) + verifier (32) + 4 wrapped blocks (64) + IV (16).
pub const HEADER_SIZE: usize = 148;

/// Salt length.
pub const SALT_SIZE: usize = 32;

/// Length of every key and digest handled by the pipeline.
pub const KEY_SIZE: usize = 32;

/// Length of the authentication tag at the end of the container.
pub const AUTH_TAG_SIZE: usize = 32;

/// EOF marker + authentication tag.
pub const TRAILER_SIZE: usize = PWS3_EOF_MARKER.len() + AUTH_TAG_SIZE;

/// Smallest byte count that can hold tag, header and trailer.
pub const MIN_CONTAINER_SIZE: usize = TAG_SIZE + HEADER_SIZE + TRAILER_SIZE;

/// On-disk field prefix: little-endian `u32` length + one type byte.
pub const FIELD_PREFIX_SIZE: usize = 5;

/// Type tag ending the header phase (and, in the record phase, an entry).
pub const END_OF_ENTRY: u8 = 0xff;

/// Default ceiling on the stored iteration count.
///
/// The count comes from an unauthenticated header, so an absurd value would
/// otherwise stall the process before the passphrase is even checked.
pub const DEFAULT_MAX_ITERATIONS: u32 = 5_000_000;

/// Iteration count recommended for newly written vaults.
pub const RECOMMENDED_MIN_ITERATIONS: u32 = 2048;
