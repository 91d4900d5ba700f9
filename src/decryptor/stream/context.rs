//! src/decryptor/stream/context.rs
//! CBC chaining state for the body decryptor

use crate::aliases::{Block16, Iv16};
use crate::consts::BLOCK_SIZE;
use crate::crypto::provider::BlockDecryptor;
use crate::utils::xor_blocks;
use std::io::{ErrorKind, Read};

/// Previous ciphertext block, seeded with the header IV.
pub struct DecryptionContext {
    chain: Block16,
    scratch: Block16,
}

impl DecryptionContext {
    #[inline(always)]
    pub fn new_with_iv(iv: &Iv16) -> Self {
        Self {
            chain: Block16::new(*iv),
            scratch: Block16::new([0u8; BLOCK_SIZE]),
        }
    }

    /// `P_i = D(C_i) ^ C_{i-1}`; then `C_i` becomes the chaining block.
    #[inline(always)]
    pub fn decrypt_block<C: BlockDecryptor>(
        &mut self,
        cipher: &C,
        ciphertext: &[u8; BLOCK_SIZE],
        plaintext: &mut [u8],
    ) {
        self.scratch.copy_from_slice(ciphertext);
        cipher.decrypt_in_place(&mut self.scratch);
        xor_blocks(&self.scratch[..], &self.chain[..], plaintext);
        self.chain.copy_from_slice(ciphertext);
    }
}

/// Read until `block` is full or the source reports end of data.
///
/// Returns the number of bytes placed in `block`; anything below
/// [`BLOCK_SIZE`] means the source is exhausted.
#[inline(always)]
pub fn fill_block<R: Read>(
    source: &mut R,
    block: &mut [u8; BLOCK_SIZE],
) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < BLOCK_SIZE {
        match source.read(&mut block[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
