//! Filename decryption.
//!
//! Encrypted names are stored as base64 path components. odrive writes the
//! URL-safe alphabet; the standard alphabet and missing padding are accepted
//! as well.

use crate::aliases::PasswordString;
use crate::decryptor::decipher::FilenameDecipher;
use crate::error::OdriveCryptError;
use crate::utils::fork_password;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode an encrypted filename into its raw ciphertext (header included).
pub fn decode_filename(encoded: &str) -> Result<Vec<u8>, OdriveCryptError> {
    let normalized: String = encoded
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    LENIENT_URL_SAFE
        .decode(normalized)
        .map_err(|e| OdriveCryptError::Encoding(format!("invalid base64 filename: {e}")))
}

/// Decrypt a base64 filename (or folder name) to UTF-8.
///
/// # Errors
///
/// - [`OdriveCryptError::Encoding`] - not base64, or the plaintext is not UTF-8
/// - any engine error, typically [`OdriveCryptError::Cipher`] or
///   [`OdriveCryptError::InvalidPrefix`] for a wrong passphrase
pub fn decrypt_filename(
    encoded: &str,
    password: &PasswordString,
) -> Result<String, OdriveCryptError> {
    let ciphertext = decode_filename(encoded)?;

    let mut decipher = FilenameDecipher::for_filename(fork_password(password));
    let mut name = decipher.update(&ciphertext)?;
    name.extend(decipher.finalize()?);

    String::from_utf8(name)
        .map_err(|e| OdriveCryptError::Encoding(format!("decrypted filename is not UTF-8: {e}")))
}
