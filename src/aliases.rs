//! # Secure-Gate Type Aliases
//!
//! Type aliases for secure memory management using [`secure-gate`](https://github.com/Slurp9187/secure-gate).
//! Every type here zeroizes its contents on drop and requires an explicit
//! `.expose_secret()` / `.expose_secret_mut()` to reach the bytes.
//!
//! ## Type Categories
//!
//! ### HMAC Primitives
//! - [`HmacSha256`] - PRF for PBKDF2 key derivation
//!
//! ### Generic Secure Buffers
//! - [`SpanBuffer<N>`] - Generic secure stack buffer for any size `N`
//!
//! ### Semantic Fixed-Size Types
//! - [`Aes128Key16`] - derived AES-128 key
//! - [`Block16`] - one AES block
//! - [`Iv16`] - CBC initialization vector
//! - [`Salt8`] - PBKDF2 salt
//!
//! ### Dynamic Secrets
//! - [`PasswordString`] - passphrase wrapper

use hmac::Hmac;
use sha2::Sha256;

// ─────────────────────────────────────────────────────────────────────────────
// HMAC primitive
// ─────────────────────────────────────────────────────────────────────────────
pub type HmacSha256 = Hmac<Sha256>;

// ─────────────────────────────────────────────────────────────────────────────
// SpanBuffer: generic secure stack buffer (direct alias to secure-gate's Fixed)
// ─────────────────────────────────────────────────────────────────────────────
pub type SpanBuffer<const N: usize> = secure_gate::Fixed<[u8; N]>;

// Semantic sub-types, alphabetical order
pub type Aes128Key16 = SpanBuffer<16>; // PBKDF2 output
pub type Block16 = SpanBuffer<16>; // one AES block
pub type Iv16 = SpanBuffer<16>; // header IV, CBC chaining block
pub type Salt8 = SpanBuffer<8>; // header salt

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────
pub type PasswordString = secure_gate::Dynamic<String>;
