//! src/crypto/kdf/pbkdf2.rs

use crate::aliases::{Aes128Key16, HmacSha256, PasswordString, Salt8};
use crate::OdriveCryptError;

use pbkdf2::pbkdf2;

/// Derive PBKDF2-HMAC-SHA256 directly into an `Aes128Key16` buffer.
///
/// The passphrase is used as raw UTF-8 bytes. Each stream derives its own key
/// from its own salt; nothing is cached.
///
/// # Security
/// - Output buffer is zeroized on drop
/// - Password never leaves its secure-gate wrapper
#[inline(always)]
pub fn derive_secure_pbkdf2_key(
    password: &PasswordString,
    salt: &Salt8,
    iterations: u32,
    out_key: &mut Aes128Key16,
) -> Result<(), OdriveCryptError> {
    if iterations == 0 {
        return Err("PBKDF2 iterations must be ≥1".into());
    }

    pbkdf2::<HmacSha256>(
        password.expose_secret().as_bytes(),
        salt.expose_secret(),
        iterations,
        out_key.expose_secret_mut(),
    )
    .map_err(|e| OdriveCryptError::Crypto(format!("PBKDF2 failed: {e}")))?;
    Ok(())
}
