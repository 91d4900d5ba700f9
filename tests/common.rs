//! tests/common.rs
//! Synthetic vault builder and constants shared across test files
//!
//! The builder encrypts with the RustCrypto crates directly, so it never goes
//! through the code under test.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use twofish::cipher::generic_array::GenericArray;
use twofish::cipher::{BlockEncrypt, KeyInit};
use twofish::Twofish;

/// Fast iteration count for tests - the real 2048 is exercised where it matters.
pub const TEST_ITERATIONS: u32 = 5;

/// Standard test passphrase
#[allow(dead_code)] // Used across multiple test files
pub const TEST_PASSWORD: &[u8] = b"correct horse battery staple";

/// End-of-header / end-of-entry type byte
#[allow(dead_code)] // Used across multiple test files
pub const SENTINEL: u8 = 0xff;

/// Offset of the ciphertext body in a container
#[allow(dead_code)] // Used across multiple test files
pub const BODY_OFFSET: usize = 4 + 148;

/// A container plus the values a caller would compute independently.
#[allow(dead_code)] // Used across multiple test files
pub struct BuiltVault {
    pub bytes: Vec<u8>,
    pub stretched: [u8; 32],
    pub tag: [u8; 32],
    pub body_len: usize,
}

/// Builds a well-formed container; every knob has a fixed default.
#[allow(dead_code)] // Used across multiple test files
pub struct VaultBuilder {
    passphrase: Vec<u8>,
    salt: [u8; 32],
    iterations: u32,
    enc_key: [u8; 32],
    mac_key: [u8; 32],
    iv: [u8; 16],
    padding: u8,
    fields: Vec<(u8, Vec<u8>)>,
    plaintext: Option<Vec<u8>>,
}

impl Default for VaultBuilder {
    fn default() -> Self {
        Self {
            passphrase: TEST_PASSWORD.to_vec(),
            salt: [0x5a; 32],
            iterations: TEST_ITERATIONS,
            enc_key: core::array::from_fn(|i| i as u8),
            mac_key: core::array::from_fn(|i| 0xff - i as u8),
            iv: [0x1f; 16],
            padding: 0,
            fields: Vec::new(),
            plaintext: None,
        }
    }
}

#[allow(dead_code)] // Used across multiple test files
impl VaultBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passphrase(mut self, passphrase: &[u8]) -> Self {
        self.passphrase = passphrase.to_vec();
        self
    }

    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn salt(mut self, salt: [u8; 32]) -> Self {
        self.salt = salt;
        self
    }

    pub fn padding(mut self, padding: u8) -> Self {
        self.padding = padding;
        self
    }

    pub fn field(mut self, tag: u8, payload: &[u8]) -> Self {
        self.fields.push((tag, payload.to_vec()));
        self
    }

    /// Encrypt these bytes verbatim instead of encoding `fields`.
    /// The tag is still computed from `fields`.
    pub fn raw_plaintext(mut self, plaintext: Vec<u8>) -> Self {
        self.plaintext = Some(plaintext);
        self
    }

    pub fn build(&self) -> BuiltVault {
        let stretched = stretch(&self.passphrase, &self.salt, self.iterations);
        let verifier: [u8; 32] = Sha256::digest(stretched).into();

        let kek = Twofish::new_from_slice(&stretched).unwrap();
        let mut wrapped = Vec::with_capacity(64);
        for key in [&self.enc_key, &self.mac_key] {
            for half in key.chunks_exact(16) {
                let mut block = GenericArray::clone_from_slice(half);
                kek.encrypt_block(&mut block);
                wrapped.extend_from_slice(&block);
            }
        }

        let plaintext = self
            .plaintext
            .clone()
            .unwrap_or_else(|| encode_fields(&self.fields, self.padding));
        let body = cbc_encrypt(&self.enc_key, &self.iv, &plaintext);
        let tag = payload_hmac(&self.mac_key, &self.fields);

        let mut bytes = b"PWS3".to_vec();
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.iterations.to_le_bytes());
        bytes.extend_from_slice(&verifier);
        bytes.extend_from_slice(&wrapped);
        bytes.extend_from_slice(&self.iv);
        bytes.extend_from_slice(&body);
        bytes.extend_from_slice(b"PWS3-EOFPWS3-EOF");
        bytes.extend_from_slice(&tag);

        BuiltVault {
            bytes,
            stretched,
            tag,
            body_len: body.len(),
        }
    }
}

/// `H(P||salt)` followed by `iterations` rounds of `H(K)`.
#[allow(dead_code)] // Used across multiple test files
pub fn stretch(passphrase: &[u8], salt: &[u8; 32], iterations: u32) -> [u8; 32] {
    let mut key: [u8; 32] = Sha256::new()
        .chain_update(passphrase)
        .chain_update(salt)
        .finalize()
        .into();
    for _ in 0..iterations {
        key = Sha256::digest(key).into();
    }
    key
}

/// Length + type + payload, each field padded to 16 bytes with `padding`.
#[allow(dead_code)] // Used across multiple test files
pub fn encode_fields(fields: &[(u8, Vec<u8>)], padding: u8) -> Vec<u8> {
    let mut out = Vec::new();
    for (tag, payload) in fields {
        let start = out.len();
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.push(*tag);
        out.extend_from_slice(payload);
        let padded = (payload.len() + 5 + 15) / 16 * 16;
        out.resize(start + padded, padding);
    }
    out
}

/// HMAC-SHA256 over every non-empty payload, in order.
#[allow(dead_code)] // Used across multiple test files
pub fn payload_hmac(key: &[u8; 32], fields: &[(u8, Vec<u8>)]) -> [u8; 32] {
    let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(key).unwrap();
    for (_, payload) in fields.iter().filter(|(_, p)| !p.is_empty()) {
        mac.update(payload);
    }
    mac.finalize().into_bytes().into()
}

fn cbc_encrypt(key: &[u8; 32], iv: &[u8; 16], plaintext: &[u8]) -> Vec<u8> {
    let cipher = Twofish::new_from_slice(key).unwrap();
    let mut chain = *iv;
    let mut out = Vec::with_capacity(plaintext.len());
    for block in plaintext.chunks_exact(16) {
        let mut mixed = GenericArray::clone_from_slice(block);
        for (m, c) in mixed.iter_mut().zip(chain.iter()) {
            *m ^= c;
        }
        cipher.encrypt_block(&mut mixed);
        chain.copy_from_slice(&mixed);
        out.extend_from_slice(&mixed);
    }
    out
}
