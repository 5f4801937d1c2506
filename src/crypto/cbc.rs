//! src/crypto/cbc.rs
//! Incremental AES-128-CBC decryption with PKCS#7 removal.
//!
//! Same construction as the rest of the crate: raw `aes` block decryption
//! plus an explicit XOR with the previous ciphertext block. The most recent
//! plaintext block is always held back, since only `finalize` can tell
//! whether it is the padded one.

use crate::aliases::{Aes128Key16, Block16, Iv16};
use crate::carry::CarryBuffer;
use crate::consts::BLOCK_SIZE;
use crate::error::OdriveCryptError;
use crate::utils::xor_blocks;
use aes::cipher::{BlockDecrypt, KeyInit};
use aes::{Aes128Dec, Block as AesBlock};
use subtle::ConstantTimeEq;

/// One CBC decryption stream: key schedule, chaining block, partial
/// ciphertext block and the held-back plaintext block.
pub struct CbcDecryptSession {
    cipher: Aes128Dec,
    chain: Block16,
    partial: CarryBuffer<BLOCK_SIZE>,
    held: Block16,
    has_held: bool,
}

impl CbcDecryptSession {
    #[must_use]
    pub fn new(key: &Aes128Key16, iv: &Iv16) -> Self {
        Self {
            cipher: Aes128Dec::new(key.expose_secret().into()),
            chain: Block16::new(*iv.expose_secret()),
            partial: CarryBuffer::new(),
            held: Block16::new([0u8; BLOCK_SIZE]),
            has_held: false,
        }
    }

    /// Decrypt as much of `ciphertext` as possible.
    ///
    /// The output lags the input by one block (plus any partial block), so
    /// it may be empty even for non-empty input.
    pub fn update(&mut self, ciphertext: &[u8]) -> Vec<u8> {
        let mut plaintext = Vec::with_capacity(ciphertext.len() + BLOCK_SIZE);
        let mut rest = ciphertext;

        if !self.partial.is_empty() {
            let taken = self.partial.fill_from(rest);
            rest = &rest[taken..];
            if let Some(block) = self.partial.as_array().copied() {
                self.decrypt_block(&block, &mut plaintext);
                self.partial.clear();
            }
        }

        let mut blocks = rest.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            self.decrypt_block(block, &mut plaintext);
        }
        self.partial.fill_from(blocks.remainder());

        plaintext
    }

    /// Flush the held-back block and strip PKCS#7 padding.
    ///
    /// # Errors
    ///
    /// [`OdriveCryptError::Cipher`] when the ciphertext was not block
    /// aligned, contained no block at all, or the padding is invalid.
    pub fn finalize(self) -> Result<Vec<u8>, OdriveCryptError> {
        if !self.partial.is_empty() {
            return Err(OdriveCryptError::Cipher(format!(
                "wrong final block length ({} trailing bytes)",
                self.partial.len()
            )));
        }
        if !self.has_held {
            return Err(OdriveCryptError::Cipher(
                "wrong final block length (no ciphertext blocks)".into(),
            ));
        }

        let block = self.held.expose_secret();
        let padding = block[BLOCK_SIZE - 1];

        // Range check on a single byte, early return is fine
        if padding == 0 || usize::from(padding) > BLOCK_SIZE {
            return Err(OdriveCryptError::Cipher("bad decrypt (invalid padding)".into()));
        }

        let padding_start = BLOCK_SIZE - usize::from(padding);
        let expected_padding = [padding; BLOCK_SIZE];
        if !bool::from(block[padding_start..].ct_eq(&expected_padding[padding_start..])) {
            return Err(OdriveCryptError::Cipher("bad decrypt (corrupt padding)".into()));
        }

        Ok(block[..padding_start].to_vec())
    }

    #[inline(always)]
    fn decrypt_block(&mut self, ciphertext: &[u8], plaintext: &mut Vec<u8>) {
        let mut aes_block = *AesBlock::from_slice(ciphertext);
        self.cipher.decrypt_block(&mut aes_block);

        if self.has_held {
            plaintext.extend_from_slice(self.held.expose_secret());
        }
        xor_blocks(
            aes_block.as_slice(),
            self.chain.expose_secret(),
            self.held.expose_secret_mut(),
        );
        self.has_held = true;

        self.chain.expose_secret_mut().copy_from_slice(ciphertext);
        aes_block.as_mut_slice().fill(0);
    }
}
