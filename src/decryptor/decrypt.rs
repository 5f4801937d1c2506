//! src/decryptor/decrypt.rs
//! High-level file-body decryption: whole buffer and `Read` → `Write`.

use crate::aliases::PasswordString;
use crate::consts::STREAM_CHUNK_SIZE;
use crate::decryptor::decipher::FileDecipher;
use crate::error::OdriveCryptError;
use crate::utils::fork_password;
use std::io::{ErrorKind, Read, Write};

/// Decrypt a complete in-memory file ciphertext.
///
/// Not recommended for large files: input and output both live in memory.
/// Use [`decrypt`] or [`DecryptReader`](crate::DecryptReader) for streaming.
pub fn decrypt_buffer(
    ciphertext: &[u8],
    password: &PasswordString,
) -> Result<Vec<u8>, OdriveCryptError> {
    let mut decipher = FileDecipher::for_file(fork_password(password));
    let mut plaintext = decipher.update(ciphertext)?;
    plaintext.extend(decipher.finalize()?);
    Ok(plaintext)
}

/// Decrypt a file body from `input_reader` into `output_writer`.
///
/// Reads in [`STREAM_CHUNK_SIZE`] chunks and writes plaintext as soon as the
/// engine releases it. The trailer hash is only checked at the end, so on
/// error the writer may already hold unverified plaintext; callers that
/// write to disk should discard the output (see
/// [`decrypt_file`](crate::decrypt_file)).
///
/// Returns the number of plaintext bytes written.
pub fn decrypt<R, W>(
    mut input_reader: R,
    mut output_writer: W,
    password: &PasswordString,
) -> Result<u64, OdriveCryptError>
where
    R: Read,
    W: Write,
{
    let mut decipher = FileDecipher::for_file(fork_password(password));
    let mut chunk = vec![0u8; STREAM_CHUNK_SIZE];
    let mut written = 0u64;

    loop {
        let n = match input_reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        let plaintext = decipher.update(&chunk[..n])?;
        output_writer.write_all(&plaintext)?;
        written += plaintext.len() as u64;
    }

    let tail = decipher.finalize()?;
    output_writer.write_all(&tail)?;
    output_writer.flush()?;
    written += tail.len() as u64;

    Ok(written)
}
