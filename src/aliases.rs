//! # Secret Type Aliases
//!
//! Fixed-size buffers that are wiped on drop via [`zeroize`].
//!
//! ## Type Categories
//!
//! ### HMAC Primitives
//! - [`HmacSha256`] - content authentication
//!
//! ### Fixed-Size Secrets
//! - [`Key32`] - stretched key, content-encryption key, content-authentication key
//! - [`Block16`] - one Twofish block of plaintext or chaining state
//!
//! ### Public Fixed-Size Values
//! - [`Salt32`], [`Iv16`], [`Digest32`] - header fields, not secret
//!
//! All secret types deref to the underlying array; the wipe happens when
//! they go out of scope, including on early `?` returns.

use hmac::Hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::consts::{BLOCK_SIZE, KEY_SIZE, SALT_SIZE};

pub type HmacSha256 = Hmac<Sha256>;

// Secrets
pub type Key32 = Zeroizing<[u8; KEY_SIZE]>;
pub type Block16 = Zeroizing<[u8; BLOCK_SIZE]>;

// Public header values
pub type Salt32 = [u8; SALT_SIZE];
pub type Iv16 = [u8; BLOCK_SIZE];
pub type Digest32 = [u8; KEY_SIZE];

/// Fresh all-zero key buffer.
#[inline(always)]
pub fn zeroed_key() -> Key32 {
    Zeroizing::new([0u8; KEY_SIZE])
}
