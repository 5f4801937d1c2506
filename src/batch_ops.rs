//! Parallel decryption of many independent file bodies.

use crate::aliases::PasswordString;
use crate::decryptor::decrypt;
use crate::error::OdriveCryptError;
use rayon::prelude::*;
use std::io::{Read, Write};

/// Decrypt every `(reader, writer)` pair on the rayon thread pool.
///
/// Each pair gets its own engine and its own copy of the passphrase. Stops at
/// the first failure; pairs already in flight may still complete.
pub fn decrypt_batch<R, W>(
    batch: &mut [(R, W)],
    password: &PasswordString,
) -> Result<(), OdriveCryptError>
where
    R: Read + Send,
    W: Write + Send,
{
    batch
        .par_iter_mut()
        .try_for_each(|(src, dst)| decrypt(src, dst, password).map(drop))
}
