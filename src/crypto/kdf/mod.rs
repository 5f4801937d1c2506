//! # Key Derivation Functions (KDF)
//!
//! The format uses a single KDF: PBKDF2 with HMAC-SHA256, 5000 iterations,
//! a 16-byte output and the 8-byte salt from the stream header.
//!
//! The high-level decryption API derives keys automatically. [`pbkdf2`] is
//! exposed for custom flows and for the benchmarks.

pub mod pbkdf2;
