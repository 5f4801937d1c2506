// src/lib.rs

//! Decryption of files and filenames produced by odrive's Encryptor.
//!
//! Every encrypted payload starts with a 25-byte header (version `'1'`,
//! 8-byte salt, 16-byte IV). The key is PBKDF2-HMAC-SHA256 over the
//! passphrase (5000 iterations, 16 bytes) and the body is AES-128-CBC with
//! PKCS#7 padding. File plaintext ends with a SHA-256 trailer of the content;
//! filename plaintext starts with four zero bytes and is stored as base64.
//!
//! ```no_run
//! use odrivecrypt_rs::aliases::PasswordString;
//! use odrivecrypt_rs::{decrypt, decrypt_filename};
//! use std::fs::File;
//!
//! let password = PasswordString::new("password123".to_string());
//! let name = decrypt_filename("MaUi8C8YFNhN5dzbjNtqgXx3Cm-PwyUYxR1Rl4JauHHrjrTMo0k9poE=", &password)?;
//! decrypt(File::open("encrypted.bin")?, File::create(&name)?, &password)?;
//! # Ok::<(), odrivecrypt_rs::OdriveCryptError>(())
//! ```

pub mod aliases;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod carry;
pub mod consts;
pub mod crypto;
pub mod decryptor;
pub mod error;
pub mod fs_ops;
pub mod header;
pub mod tree;
pub mod utils;

// High-level API
pub use decryptor::{decrypt, decrypt_buffer, decrypt_filename, DecryptReader};
pub use error::OdriveCryptError;

// Engine
pub use decryptor::{
    decode_filename, Decipher, DecipherState, FileDecipher, FilenameDecipher, PostProcess,
    RawDecipher,
};

#[cfg(feature = "channel")]
pub use decryptor::decrypt_channel;

pub use crypto::kdf::pbkdf2::derive_secure_pbkdf2_key;
pub use header::{read_header, read_version, Header};

pub use fs_ops::{decrypt_file, decrypt_file_in_memory};
pub use tree::{decrypt_tree, TreeFailure, TreeReport};

#[cfg(feature = "batch-ops")]
pub use batch_ops::decrypt_batch;
