// src/crypto/mod.rs

//! Low-level crypto primitives.
//!
//! - [`kdf`] - passphrase → AES key (PBKDF2-HMAC-SHA256)
//! - [`cbc`] - incremental AES-128-CBC decryption session
//!
//! HMAC types are defined in `aliases.rs`.

pub mod cbc;
pub mod kdf;
