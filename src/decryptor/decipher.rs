//! src/decryptor/decipher.rs
//! The incremental decryption engine.
//!
//! ```text
//! AwaitingHeader ──25 bytes──▶ Streaming ──finalize──▶ Finalized
//!        │                         │
//!        └───────── error ─────────┴──────▶ Failed
//! ```
//!
//! The engine is a pure function of (state, chunk) → (state, plaintext): it
//! never blocks, logs or retries, so the same instance works for one giant
//! buffer or for thousands of tiny chunks.

use crate::aliases::{Aes128Key16, PasswordString};
use crate::consts::{KDF_ITERATIONS, KEY_SIZE};
use crate::crypto::cbc::CbcDecryptSession;
use crate::crypto::kdf::pbkdf2::derive_secure_pbkdf2_key;
use crate::decryptor::post::{FilenamePrefix, FileTrailer, Passthrough, PostProcess};
use crate::error::OdriveCryptError;
use crate::header::HeaderAssembler;
use std::fmt;

/// Observable lifecycle state of a [`Decipher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecipherState {
    AwaitingHeader,
    Streaming,
    Finalized,
    Failed,
}

impl fmt::Display for DecipherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AwaitingHeader => "awaiting header",
            Self::Streaming => "streaming",
            Self::Finalized => "finalized",
            Self::Failed => "failed",
        })
    }
}

// The passphrase lives only inside `AwaitingHeader`; leaving that variant
// drops it, and secure-gate wipes it on drop.
enum Stage {
    AwaitingHeader {
        password: PasswordString,
        header: HeaderAssembler,
    },
    Streaming(CbcDecryptSession),
    Finalized,
    Failed,
}

impl Stage {
    const fn state(&self) -> DecipherState {
        match self {
            Self::AwaitingHeader { .. } => DecipherState::AwaitingHeader,
            Self::Streaming(_) => DecipherState::Streaming,
            Self::Finalized => DecipherState::Finalized,
            Self::Failed => DecipherState::Failed,
        }
    }
}

/// Single-use decryption engine, generic over the post-processing strategy.
///
/// Feed ciphertext with [`update`](Self::update) in chunks of any size, then
/// call [`finalize`](Self::finalize) once. The concatenation of all returned
/// buffers is the plaintext.
///
/// # Example
///
/// ```
/// use odrivecrypt_rs::aliases::PasswordString;
/// use odrivecrypt_rs::{decode_filename, FilenameDecipher};
///
/// let ciphertext = decode_filename("MaUi8C8YFNhN5dzbjNtqgXx3Cm-PwyUYxR1Rl4JauHHrjrTMo0k9poE=")?;
/// let mut decipher = FilenameDecipher::for_filename(PasswordString::new("password123".to_string()));
///
/// let mut name = Vec::new();
/// for chunk in ciphertext.chunks(7) {
///     name.extend(decipher.update(chunk)?);
/// }
/// name.extend(decipher.finalize()?);
/// assert_eq!(name, b"test.txt");
/// # Ok::<(), odrivecrypt_rs::OdriveCryptError>(())
/// ```
pub struct Decipher<P> {
    stage: Stage,
    post: P,
}

/// Engine for file bodies (strips and checks the SHA-256 trailer).
pub type FileDecipher = Decipher<FileTrailer>;

/// Engine for encrypted filenames (strips and checks the zero prefix).
pub type FilenameDecipher = Decipher<FilenamePrefix>;

/// Engine without post-processing.
pub type RawDecipher = Decipher<Passthrough>;

impl Decipher<FileTrailer> {
    #[must_use]
    pub fn for_file(password: PasswordString) -> Self {
        Self::new(password, FileTrailer::new())
    }
}

impl Decipher<FilenamePrefix> {
    #[must_use]
    pub fn for_filename(password: PasswordString) -> Self {
        Self::new(password, FilenamePrefix::new())
    }
}

impl Decipher<Passthrough> {
    #[must_use]
    pub fn raw(password: PasswordString) -> Self {
        Self::new(password, Passthrough)
    }
}

impl<P: PostProcess> Decipher<P> {
    /// Create an engine bound to `password`.
    ///
    /// The engine takes ownership of the passphrase and wipes it as soon as
    /// the key has been derived.
    #[must_use]
    pub fn new(password: PasswordString, post: P) -> Self {
        Self {
            stage: Stage::AwaitingHeader {
                password,
                header: HeaderAssembler::new(),
            },
            post,
        }
    }

    #[inline(always)]
    pub const fn state(&self) -> DecipherState {
        self.stage.state()
    }

    /// Push a chunk of ciphertext; returns the plaintext it released.
    ///
    /// The result may be empty, e.g. while the header is still being
    /// assembled or while the file trailer window fills up.
    ///
    /// # Errors
    ///
    /// - [`OdriveCryptError::UnsupportedVersion`] - header version is not `'1'`
    /// - [`OdriveCryptError::InvalidPrefix`] - filename canary mismatch
    /// - [`OdriveCryptError::InvalidState`] - engine already finalized or failed
    ///
    /// Any error leaves the engine in [`DecipherState::Failed`].
    pub fn update(&mut self, chunk: &[u8]) -> Result<Vec<u8>, OdriveCryptError> {
        if matches!(self.stage, Stage::Finalized | Stage::Failed) {
            return Err(OdriveCryptError::InvalidState(self.state()));
        }

        let result = self.update_active(chunk);
        if result.is_err() {
            self.stage = Stage::Failed;
        }
        result
    }

    /// Flush the cipher, run the end-of-stream checks and return the last
    /// plaintext bytes.
    ///
    /// # Errors
    ///
    /// - [`OdriveCryptError::IncompleteHeader`] - fewer than 25 bytes ever arrived
    /// - [`OdriveCryptError::Cipher`] - truncated body or bad padding
    /// - [`OdriveCryptError::Integrity`] / [`OdriveCryptError::InvalidPrefix`] - post-processing check failed
    /// - [`OdriveCryptError::InvalidState`] - engine already finalized or failed
    pub fn finalize(&mut self) -> Result<Vec<u8>, OdriveCryptError> {
        let result = match std::mem::replace(&mut self.stage, Stage::Failed) {
            Stage::AwaitingHeader { header, .. } => Err(OdriveCryptError::IncompleteHeader {
                received: header.received(),
            }),
            Stage::Streaming(session) => match session.finalize() {
                Ok(tail) => self.post.finalize(tail),
                Err(e) => Err(e),
            },
            done @ (Stage::Finalized | Stage::Failed) => {
                let state = done.state();
                self.stage = done;
                return Err(OdriveCryptError::InvalidState(state));
            }
        };

        if result.is_ok() {
            self.stage = Stage::Finalized;
        }
        result
    }

    fn update_active(&mut self, chunk: &[u8]) -> Result<Vec<u8>, OdriveCryptError> {
        let mut body = chunk;

        if let Stage::AwaitingHeader { header, .. } = &mut self.stage {
            let taken = header.push(chunk);
            body = &chunk[taken..];
            if !header.is_complete() {
                return Ok(Vec::new());
            }
            self.begin_streaming()?;
        }

        match &mut self.stage {
            Stage::Streaming(session) => {
                if body.is_empty() {
                    return Ok(Vec::new());
                }
                let plaintext = session.update(body);
                self.post.process(plaintext)
            }
            other => Err(OdriveCryptError::InvalidState(other.state())),
        }
    }

    /// Header complete: parse it, derive the key, drop the passphrase.
    fn begin_streaming(&mut self) -> Result<(), OdriveCryptError> {
        let Stage::AwaitingHeader { password, header } =
            std::mem::replace(&mut self.stage, Stage::Failed)
        else {
            return Err(OdriveCryptError::InvalidState(self.state()));
        };

        // Early returns below drop `password` as well
        let header = header.finish()?;
        let mut key = Aes128Key16::new([0u8; KEY_SIZE]);
        derive_secure_pbkdf2_key(&password, header.salt(), KDF_ITERATIONS, &mut key)?;
        drop(password);

        self.stage = Stage::Streaming(CbcDecryptSession::new(&key, header.iv()));
        Ok(())
    }
}

impl<P> fmt::Debug for Decipher<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decipher")
            .field("state", &self.stage.state())
            .finish_non_exhaustive()
    }
}
