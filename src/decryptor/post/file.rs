//! src/decryptor/post/file.rs
//! Trailer processing: strip and verify the SHA-256 appended to file plaintext.
//!
//! Where the trailer starts is only known at end of stream, so the last 32
//! decrypted bytes are always withheld and everything older is hashed and
//! released.

use super::PostProcess;
use crate::carry::CarryBuffer;
use crate::consts::HASH_SIZE;
use crate::error::OdriveCryptError;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// File post-processor: trailer window plus running SHA-256.
pub struct FileTrailer {
    window: CarryBuffer<HASH_SIZE>,
    hasher: Sha256,
}

impl FileTrailer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: CarryBuffer::new(),
            hasher: Sha256::new(),
        }
    }
}

impl Default for FileTrailer {
    fn default() -> Self {
        Self::new()
    }
}

impl PostProcess for FileTrailer {
    fn process(&mut self, data: Vec<u8>) -> Result<Vec<u8>, OdriveCryptError> {
        let mut released = Vec::with_capacity(data.len());
        self.window.shift_in(&data, &mut released);
        if !released.is_empty() {
            self.hasher.update(&released);
        }
        Ok(released)
    }

    fn finalize(&mut self, data: Vec<u8>) -> Result<Vec<u8>, OdriveCryptError> {
        let released = self.process(data)?;

        // A short window cannot match: ct_eq is false for unequal lengths
        let digest = self.hasher.finalize_reset();
        if !bool::from(digest.as_slice().ct_eq(self.window.as_slice())) {
            return Err(OdriveCryptError::Integrity);
        }

        self.window.clear();
        Ok(released)
    }
}
