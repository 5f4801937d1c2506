//! `Read` adapter: pull plaintext out of an encrypted source.

use crate::aliases::PasswordString;
use crate::consts::STREAM_CHUNK_SIZE;
use crate::decryptor::decipher::FileDecipher;
use crate::error::OdriveCryptError;
use crate::utils::fork_password;
use std::io::{self, ErrorKind, Read};

/// Wraps an encrypted file body and yields its plaintext through [`Read`].
///
/// Decryption errors surface as `io::ErrorKind::InvalidData` with the
/// [`OdriveCryptError`] as the inner error. EOF is only reported after the
/// trailer hash has been verified.
pub struct DecryptReader<R> {
    inner: R,
    decipher: FileDecipher,
    scratch: Vec<u8>,
    pending: Vec<u8>,
    pos: usize,
    done: bool,
}

impl<R: Read> DecryptReader<R> {
    pub fn new(inner: R, password: &PasswordString) -> Self {
        Self {
            inner,
            decipher: FileDecipher::for_file(fork_password(password)),
            scratch: vec![0u8; STREAM_CHUNK_SIZE],
            pending: Vec::new(),
            pos: 0,
            done: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for DecryptReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        while self.pos == self.pending.len() {
            if self.done {
                return Ok(0);
            }

            let n = match self.inner.read(&mut self.scratch) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            self.pending = if n == 0 {
                let tail = self.decipher.finalize().map_err(into_io_error)?;
                self.done = true;
                tail
            } else {
                self.decipher
                    .update(&self.scratch[..n])
                    .map_err(into_io_error)?
            };
            self.pos = 0;
        }

        let n = (self.pending.len() - self.pos).min(buf.len());
        buf[..n].copy_from_slice(&self.pending[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fn into_io_error(err: OdriveCryptError) -> io::Error {
    match err {
        OdriveCryptError::Io(e) => e,
        other => io::Error::new(ErrorKind::InvalidData, other),
    }
}
