//! Page-locked, self-wiping heap buffer for decrypted vault content.
//!
//! Fixed-size key material lives in [`Key32`](crate::aliases::Key32); this
//! type covers the variable-length plaintext body.

use core::fmt;

use zeroize::Zeroize;

/// Owning byte buffer that is kept out of swap where the platform allows it
/// and overwritten with zeros when dropped.
///
/// Locking is best effort: when `mlock`/`VirtualLock` is refused (resource
/// limits, unsupported platform) the buffer still works and is still wiped.
pub struct SecureBuffer {
    bytes: Vec<u8>,
    // Length of the originally locked range; the Vec never reallocates.
    locked: Option<usize>,
}

impl SecureBuffer {
    /// Allocate `len` zero bytes and try to lock them in memory.
    pub fn zeroed(len: usize) -> Self {
        let bytes = vec![0u8; len];
        let locked = if len == 0 {
            None
        } else {
            match region::lock(bytes.as_ptr(), bytes.len()) {
                Ok(guard) => {
                    // Unlocked by hand in `Drop`, after the wipe.
                    std::mem::forget(guard);
                    Some(len)
                }
                Err(err) => {
                    tracing::warn!(len, error = %err, "could not lock plaintext buffer in memory");
                    None
                }
            }
        };
        Self { bytes, locked }
    }

    /// Whether the pages backing this buffer are locked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked.is_some()
    }

    /// Shorten the buffer, wiping the bytes that are cut off.
    pub fn truncate(&mut self, len: usize) {
        if len < self.bytes.len() {
            self.bytes[len..].zeroize();
            self.bytes.truncate(len);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl Drop for SecureBuffer {
    fn drop(&mut self) {
        self.bytes.zeroize();
        if let Some(len) = self.locked.take() {
            if let Err(err) = region::unlock(self.bytes.as_ptr(), len) {
                tracing::warn!(len, error = %err, "could not unlock plaintext buffer");
            }
        }
    }
}

impl fmt::Debug for SecureBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureBuffer")
            .field("len", &self.bytes.len())
            .field("locked", &self.locked.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_has_requested_length() {
        let buf = SecureBuffer::zeroed(64);
        assert_eq!(buf.len(), 64);
        assert!(buf.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn empty_buffer_is_not_locked() {
        let buf = SecureBuffer::zeroed(0);
        assert!(buf.is_empty());
        assert!(!buf.is_locked());
    }

    #[test]
    fn truncate_keeps_prefix() {
        let mut buf = SecureBuffer::zeroed(48);
        buf.as_mut_slice().copy_from_slice(&[7u8; 48]);
        buf.truncate(32);
        assert_eq!(buf.len(), 32);
        assert!(buf.as_slice().iter().all(|&b| b == 7));
        buf.truncate(64);
        assert_eq!(buf.len(), 32);
    }

    #[test]
    fn debug_does_not_print_contents() {
        let mut buf = SecureBuffer::zeroed(4);
        buf.as_mut_slice().copy_from_slice(b"abcd");
        let shown = format!("{buf:?}");
        assert!(!shown.contains("abcd"));
        assert!(!shown.contains("97"));
    }
}
