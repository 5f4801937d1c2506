//! # File Helpers
//!
//! Path-based wrappers around [`decrypt`](crate::decrypt) and
//! [`decrypt_buffer`](crate::decrypt_buffer). Both leave nothing behind on
//! failure: a partially written output file is removed.

use crate::aliases::PasswordString;
use crate::decryptor::{decrypt, decrypt_buffer};
use crate::error::OdriveCryptError;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, warn};

/// Stream-decrypt `input` into a new file at `output`.
///
/// Returns the number of plaintext bytes written. If decryption or any write
/// fails, `output` is deleted before the error is returned.
pub fn decrypt_file(
    input: &Path,
    output: &Path,
    password: &PasswordString,
) -> Result<u64, OdriveCryptError> {
    debug!(input = %input.display(), output = %output.display(), "decrypting file");

    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);

    match decrypt(reader, writer, password) {
        Ok(written) => Ok(written),
        Err(e) => {
            discard_partial(output);
            Err(e)
        }
    }
}

/// Decrypt `input` fully in memory, then write `output`.
///
/// The output file is only created once the trailer hash has been verified.
pub fn decrypt_file_in_memory(
    input: &Path,
    output: &Path,
    password: &PasswordString,
) -> Result<u64, OdriveCryptError> {
    let ciphertext = fs::read(input)?;
    let plaintext = decrypt_buffer(&ciphertext, password)?;

    if let Err(e) = fs::write(output, &plaintext) {
        discard_partial(output);
        return Err(e.into());
    }
    Ok(plaintext.len() as u64)
}

fn discard_partial(output: &Path) {
    match fs::remove_file(output) {
        Ok(()) => debug!(output = %output.display(), "removed partial output"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(output = %output.display(), error = %e, "could not remove partial output"),
    }
}
