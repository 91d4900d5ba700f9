//! Utility functions used across the library.

use crate::consts::{BLOCK_SIZE, FIELD_PREFIX_SIZE};

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// Used by the CBC chaining step of the body decryptor.
///
/// # Panics (by contract)
///
/// Panics if any of the three slices is shorter than 16 bytes. Callers only
/// pass exact-size block buffers.
#[inline(always)]
pub const fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < BLOCK_SIZE {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}

/// On-disk footprint of a field carrying `payload_len` bytes.
///
/// The 5-byte prefix plus payload, rounded up to the next multiple of the
/// block size. `None` on arithmetic overflow.
#[inline]
pub const fn padded_field_len(payload_len: usize) -> Option<usize> {
    match payload_len.checked_add(FIELD_PREFIX_SIZE + BLOCK_SIZE - 1) {
        Some(n) => Some(n / BLOCK_SIZE * BLOCK_SIZE),
        None => None,
    }
}

/// Little-endian `u32` from the first four bytes of `bytes`.
///
/// `None` if fewer than four bytes are available.
#[inline]
pub fn load_le32(bytes: &[u8]) -> Option<u32> {
    let word: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
    Some(u32::from_le_bytes(word))
}
