//! # Error Types
//!
//! This module defines the error type used throughout the library.
//! All operations return [`Result<T, OdriveCryptError>`](OdriveCryptError).

use crate::decryptor::DecipherState;
use thiserror::Error;

/// The error type for all odrive decryption operations.
///
/// The first six variants are produced by the decryption engine itself; the
/// rest only come from the adapters (filenames, readers, channels, files).
#[derive(Error, Debug)]
pub enum OdriveCryptError {
    /// The header version byte is not the single supported value (`'1'`).
    ///
    /// The contained value is the byte that was found.
    #[error("Unsupported version: {0:#04x}")]
    UnsupportedVersion(u8),

    /// The stream ended before the 25-byte header was complete.
    ///
    /// `received` is the number of header bytes delivered before finalization.
    #[error("Incomplete header: received {received} of 25 bytes")]
    IncompleteHeader { received: usize },

    /// AES-CBC decryption could not proceed.
    ///
    /// Covers truncated ciphertext, a body that is not block aligned and
    /// malformed PKCS#7 padding. Usually means a wrong passphrase.
    #[error("Cipher error: {0}")]
    Cipher(String),

    /// The file trailer does not match the SHA-256 of the decrypted content.
    #[error("Integrity error: invalid file hash")]
    Integrity,

    /// The decrypted filename does not start with the 4-byte zero prefix.
    #[error("Integrity error: invalid filename prefix")]
    InvalidPrefix,

    /// An operation was called on an engine that already finished or failed.
    #[error("Invalid state: decipher is {0}")]
    InvalidState(DecipherState),

    /// Key derivation parameters were rejected.
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// A filename was not valid base64, or did not decrypt to UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// I/O error from one of the reader/writer or filesystem adapters.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The channel adapter's output receiver was dropped mid-stream.
    #[error("Output channel closed")]
    ChannelClosed,
}

impl OdriveCryptError {
    /// `true` for the failures that mean "wrong passphrase or corrupt data".
    ///
    /// A wrong passphrase shows up as [`Cipher`](Self::Cipher) most of the
    /// time, and as [`Integrity`](Self::Integrity) or
    /// [`InvalidPrefix`](Self::InvalidPrefix) when the padding happens to
    /// validate. Callers should not try to tell these apart.
    #[must_use]
    pub fn is_decryption_failure(&self) -> bool {
        matches!(
            self,
            Self::Cipher(_) | Self::Integrity | Self::InvalidPrefix
        )
    }
}

impl From<&'static str> for OdriveCryptError {
    fn from(msg: &'static str) -> Self {
        OdriveCryptError::Crypto(msg.to_string())
    }
}
