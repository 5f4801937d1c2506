//! tests/common.rs
//! Constants and a test-only odrive encryptor shared across test files.
//!
//! The library never encrypts; the helpers below build ciphertext the way
//! odrive does so round-trip tests need no fixture files.

#![allow(dead_code)] // Each test binary uses a different subset

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes128Enc, Block};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use odrivecrypt_rs::aliases::PasswordString;
use sha2::{Digest, Sha256};

/// Passphrase used by the fixtures and most generated ciphertexts.
pub const TEST_PASSPHRASE: &str = "password123";

/// Known encrypted filename produced by odrive; decrypts to `test.txt`.
pub const FIXTURE_FILENAME: &str = "MaUi8C8YFNhN5dzbjNtqgXx3Cm-PwyUYxR1Rl4JauHHrjrTMo0k9poE=";
pub const FIXTURE_FILENAME_PLAINTEXT: &str = "test.txt";

/// Salt embedded in [`FIXTURE_FILENAME`] and the key it derives with
/// [`TEST_PASSPHRASE`].
pub const FIXTURE_SALT_HEX: &str = "a522f02f1814d84d";
pub const FIXTURE_KEY_HEX: &str = "4b959fc25e54be35221a4193259f485e";

/// Well-formed file body for "test" whose trailer is 32 zero bytes.
pub const BAD_HASH_FILE_HEX: &str = "31555555555555555566666666666666666666666666666666a757ee5e172f51bfd9d764cbd6b6ba74f8ca1af5157d719e013957c324aea311c2d243d352f2ad317c02c292b2b958f5";

/// Filename whose plaintext starts `00 00 01 00` instead of four zeros.
pub const BAD_PREFIX_FILENAME: &str = "MVVVVVVVVVVVZmZmZmZmZmZmZmZmZmZmZpD3gceRxVbypyFjbKSSUzY=";

pub const TEST_SALT: [u8; 8] = [0x5A; 8];
pub const TEST_IV: [u8; 16] = [
    0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF,
];

pub fn password() -> PasswordString {
    PasswordString::new(TEST_PASSPHRASE.to_string())
}

pub fn password_from(passphrase: &str) -> PasswordString {
    PasswordString::new(passphrase.to_string())
}

/// `'1' ‖ salt ‖ iv ‖ AES-128-CBC(PKCS#7(payload))`
pub fn encrypt_payload(passphrase: &str, salt: &[u8; 8], iv: &[u8; 16], payload: &[u8]) -> Vec<u8> {
    let mut key = [0u8; 16];
    pbkdf2::pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, 5000, &mut key);
    let cipher = Aes128Enc::new(&key.into());

    let pad = 16 - payload.len() % 16;
    let mut padded = payload.to_vec();
    padded.resize(payload.len() + pad, pad as u8);

    let mut out = Vec::with_capacity(25 + padded.len());
    out.push(b'1');
    out.extend_from_slice(salt);
    out.extend_from_slice(iv);

    let mut chain = *iv;
    for chunk in padded.chunks_exact(16) {
        let mut block = Block::default();
        for (i, b) in block.iter_mut().enumerate() {
            *b = chunk[i] ^ chain[i];
        }
        cipher.encrypt_block(&mut block);
        chain.copy_from_slice(&block);
        out.extend_from_slice(&block);
    }
    out
}

/// Encrypt a file body: `content ‖ SHA-256(content)`.
pub fn encrypt_file_body(passphrase: &str, content: &[u8]) -> Vec<u8> {
    let mut payload = content.to_vec();
    payload.extend_from_slice(&Sha256::digest(content));
    encrypt_payload(passphrase, &TEST_SALT, &TEST_IV, &payload)
}

/// Encrypt a filename: `0000 ‖ name`, URL-safe base64 with padding.
pub fn encrypt_filename(passphrase: &str, name: &str) -> String {
    let mut payload = vec![0u8; 4];
    payload.extend_from_slice(name.as_bytes());
    URL_SAFE.encode(encrypt_payload(passphrase, &TEST_SALT, &TEST_IV, &payload))
}

/// Deterministic pseudo-random content.
pub fn sample_content(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i.wrapping_mul(31) ^ (i >> 3)) as u8).collect()
}
