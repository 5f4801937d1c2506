//! # Constants
//!
//! Wire-format sizes, KDF parameters and adapter tunables. The format values
//! are fixed by files already in the wild and must not change.

/// Size of the version field at offset 0.
pub const VERSION_SIZE: usize = 1;

/// Size of the PBKDF2 salt at offset 1.
pub const SALT_SIZE: usize = 8;

/// Size of the CBC initialization vector at offset 9.
pub const IV_SIZE: usize = 16;

/// Total header size: version ‖ salt ‖ IV.
pub const HEADER_SIZE: usize = VERSION_SIZE + SALT_SIZE + IV_SIZE;

/// The only supported format version, the ASCII character `'1'`.
pub const SUPPORTED_VERSION: u8 = b'1';

/// PBKDF2-HMAC-SHA256 iteration count used by the format.
pub const KDF_ITERATIONS: u32 = 5_000;

/// Derived key length (AES-128).
pub const KEY_SIZE: usize = 16;

/// AES block size.
pub const BLOCK_SIZE: usize = 16;

/// Length of the SHA-256 trailer appended to file plaintext.
pub const HASH_SIZE: usize = 32;

/// Length of the zero prefix prepended to filename plaintext.
pub const FILENAME_PREFIX_SIZE: usize = 4;

/// Expected filename prefix.
pub const FILENAME_PREFIX: [u8; FILENAME_PREFIX_SIZE] = [0u8; FILENAME_PREFIX_SIZE];

/// Read size used by the `Read`-based adapters (64 KiB).
pub const STREAM_CHUNK_SIZE: usize = 64 * 1024;
