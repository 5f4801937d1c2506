// ============================================================================
// FILE: src/utils.rs
// ============================================================================

//! Utility functions used across the library.

use crate::aliases::PasswordString;

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// Used by the CBC chaining step.
///
/// # Panics (by contract)
///
/// Panics if any of `block_a`, `block_b` or `output` is shorter than 16
/// bytes. All callers pass AES blocks or `Block16` buffers.
#[inline(always)]
pub const fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < 16 {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}

/// Copy a passphrase into a fresh secure wrapper.
///
/// Every engine owns (and wipes) its own copy, so adapters that drive
/// several engines from one caller-supplied passphrase hand each a fork.
#[inline(always)]
pub fn fork_password(password: &PasswordString) -> PasswordString {
    PasswordString::new(password.expose_secret().clone())
}
