// src/decryptor/mod.rs

//! Decryption engine and its adapters.
//!
//! Core API: [`Decipher`] (`update` / `finalize`) with a [`PostProcess`]
//! strategy. Adapters: [`decrypt_buffer`], [`decrypt`], [`DecryptReader`],
//! [`decrypt_filename`] and, with the `channel` feature, [`decrypt_channel`].

#[cfg(feature = "channel")]
pub(crate) mod channel;
pub(crate) mod decipher;
pub(crate) mod decrypt;
pub(crate) mod filename;
pub mod post;
pub(crate) mod reader;

#[cfg(feature = "channel")]
pub use channel::{decrypt_channel, drive_channel};
pub use decipher::{Decipher, DecipherState, FileDecipher, FilenameDecipher, RawDecipher};
pub use decrypt::{decrypt, decrypt_buffer};
pub use filename::{decode_filename, decrypt_filename};
pub use post::{FilenamePrefix, FileTrailer, Passthrough, PostProcess};
pub use reader::DecryptReader;
