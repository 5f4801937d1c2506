//! src/decryptor/channel.rs
//! Message-passing streaming mode.
//!
//! Each inbound chunk drives one `update`; closing the inbound channel drives
//! `finalize`. Backpressure comes from the bounded channels, the engine
//! itself never waits.

use crate::aliases::PasswordString;
use crate::decryptor::decipher::{Decipher, FileDecipher};
use crate::decryptor::post::PostProcess;
use crate::error::OdriveCryptError;
use tokio::sync::mpsc::{Receiver, Sender};

/// Decrypt a file body delivered as a stream of chunks.
///
/// Plaintext is forwarded on `plaintext` as it becomes available (empty
/// buffers are not sent). Returns the number of plaintext bytes forwarded.
/// On error nothing more is sent and the output channel is dropped, so the
/// consumer sees end-of-stream; it must check this function's result before
/// trusting the data.
pub async fn decrypt_channel(
    chunks: Receiver<Vec<u8>>,
    plaintext: Sender<Vec<u8>>,
    password: PasswordString,
) -> Result<u64, OdriveCryptError> {
    drive_channel(FileDecipher::for_file(password), chunks, plaintext).await
}

/// Drive any [`Decipher`] from an inbound chunk channel.
pub async fn drive_channel<P: PostProcess>(
    mut decipher: Decipher<P>,
    mut chunks: Receiver<Vec<u8>>,
    plaintext: Sender<Vec<u8>>,
) -> Result<u64, OdriveCryptError> {
    let mut forwarded = 0u64;

    while let Some(chunk) = chunks.recv().await {
        let output = decipher.update(&chunk)?;
        forwarded += forward(&plaintext, output).await?;
    }

    let tail = decipher.finalize()?;
    forwarded += forward(&plaintext, tail).await?;
    Ok(forwarded)
}

async fn forward(plaintext: &Sender<Vec<u8>>, output: Vec<u8>) -> Result<u64, OdriveCryptError> {
    if output.is_empty() {
        return Ok(0);
    }
    let len = output.len() as u64;
    plaintext
        .send(output)
        .await
        .map_err(|_| OdriveCryptError::ChannelClosed)?;
    Ok(len)
}
