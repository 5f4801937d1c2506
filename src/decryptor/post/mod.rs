//! Post-processing strategies plugged into [`Decipher`](crate::decryptor::Decipher).
//!
//! Each strategy sees the decrypted bytes in delivery order and decides what
//! the caller gets to see. [`process`](PostProcess::process) runs for every
//! `update`; [`finalize`](PostProcess::finalize) runs once, on the bytes the
//! cipher released when its padding was removed.

mod file;
mod filename;

pub use file::FileTrailer;
pub use filename::FilenamePrefix;

use crate::error::OdriveCryptError;

/// Format-specific transform applied between the cipher and the caller.
pub trait PostProcess {
    /// Filter one decrypted chunk.
    fn process(&mut self, data: Vec<u8>) -> Result<Vec<u8>, OdriveCryptError>;

    /// Filter the last decrypted bytes and run any end-of-stream check.
    fn finalize(&mut self, data: Vec<u8>) -> Result<Vec<u8>, OdriveCryptError>;
}

/// No post-processing: every decrypted byte goes to the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl PostProcess for Passthrough {
    #[inline(always)]
    fn process(&mut self, data: Vec<u8>) -> Result<Vec<u8>, OdriveCryptError> {
        Ok(data)
    }

    #[inline(always)]
    fn finalize(&mut self, data: Vec<u8>) -> Result<Vec<u8>, OdriveCryptError> {
        Ok(data)
    }
}
