//! # Header Parsing
//!
//! Every encrypted stream starts with a fixed 25-byte header:
//!
//! | offset | size | field |
//! |---|---|---|
//! | 0 | 1 | version (ASCII `'1'`) |
//! | 1 | 8 | PBKDF2 salt |
//! | 9 | 16 | AES-CBC IV |
//!
//! There is no magic and no length prefix. [`HeaderAssembler`] collects the
//! header incrementally for the streaming engine; [`read_header`] and
//! [`read_version`] are the blocking equivalents for `Read` sources.

use crate::aliases::{Iv16, Salt8};
use crate::carry::CarryBuffer;
use crate::consts::{HEADER_SIZE, IV_SIZE, SALT_SIZE, SUPPORTED_VERSION, VERSION_SIZE};
use crate::error::OdriveCryptError;
use std::io::Read;

/// Parsed stream header. Salt and IV stay in zeroizing buffers.
pub struct Header {
    version: u8,
    salt: Salt8,
    iv: Iv16,
}

impl Header {
    /// Parse and validate a complete header.
    ///
    /// # Errors
    ///
    /// [`OdriveCryptError::UnsupportedVersion`] if the first byte is not `'1'`.
    pub fn parse(bytes: &[u8; HEADER_SIZE]) -> Result<Self, OdriveCryptError> {
        let version = bytes[0];
        if version != SUPPORTED_VERSION {
            return Err(OdriveCryptError::UnsupportedVersion(version));
        }

        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(&bytes[VERSION_SIZE..VERSION_SIZE + SALT_SIZE]);
        let mut iv = [0u8; IV_SIZE];
        iv.copy_from_slice(&bytes[VERSION_SIZE + SALT_SIZE..]);

        Ok(Self {
            version,
            salt: Salt8::new(salt),
            iv: Iv16::new(iv),
        })
    }

    #[inline(always)]
    pub const fn version(&self) -> u8 {
        self.version
    }

    #[inline(always)]
    pub fn salt(&self) -> &Salt8 {
        &self.salt
    }

    #[inline(always)]
    pub fn iv(&self) -> &Iv16 {
        &self.iv
    }
}

/// Accumulates header bytes across arbitrarily sized chunks.
#[derive(Default)]
pub struct HeaderAssembler {
    bytes: CarryBuffer<HEADER_SIZE>,
}

impl HeaderAssembler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the header bytes still missing from the front of `chunk`.
    ///
    /// Returns the number of bytes consumed; everything after that belongs
    /// to the ciphertext body.
    #[inline(always)]
    pub fn push(&mut self, chunk: &[u8]) -> usize {
        self.bytes.fill_from(chunk)
    }

    #[inline(always)]
    pub const fn is_complete(&self) -> bool {
        self.bytes.is_full()
    }

    /// Header bytes received so far (0..=25).
    #[inline(always)]
    pub const fn received(&self) -> usize {
        self.bytes.len()
    }

    /// Parse the assembled header.
    ///
    /// # Errors
    ///
    /// [`OdriveCryptError::IncompleteHeader`] before all 25 bytes arrived,
    /// [`OdriveCryptError::UnsupportedVersion`] on a bad version byte.
    pub fn finish(&self) -> Result<Header, OdriveCryptError> {
        match self.bytes.as_array() {
            Some(bytes) => Header::parse(bytes),
            None => Err(OdriveCryptError::IncompleteHeader {
                received: self.received(),
            }),
        }
    }
}

/// Read and parse the full header from a blocking reader.
///
/// The reader is left positioned at the first ciphertext byte.
///
/// # Errors
///
/// - [`OdriveCryptError::IncompleteHeader`] - the reader hit EOF inside the header
/// - [`OdriveCryptError::UnsupportedVersion`] - bad version byte
/// - [`OdriveCryptError::Io`] - any other read failure
pub fn read_header<R: Read>(mut reader: R) -> Result<Header, OdriveCryptError> {
    let mut assembler = HeaderAssembler::new();
    let mut scratch = [0u8; HEADER_SIZE];

    while !assembler.is_complete() {
        let wanted = HEADER_SIZE - assembler.received();
        let n = match reader.read(&mut scratch[..wanted]) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(OdriveCryptError::Io(e)),
        };
        assembler.push(&scratch[..n]);
    }
    scratch.fill(0);

    assembler.finish()
}

/// Read and validate only the version byte.
///
/// Cheap pre-flight check for file management tools: it does not need the
/// passphrase and reads exactly one byte.
///
/// # Example
///
/// ```
/// use odrivecrypt_rs::read_version;
/// use std::io::Cursor;
///
/// assert_eq!(read_version(Cursor::new(b"1rest-of-header"))?, b'1');
/// assert!(read_version(Cursor::new(b"2")).is_err());
/// # Ok::<(), odrivecrypt_rs::OdriveCryptError>(())
/// ```
///
/// # Errors
///
/// - [`OdriveCryptError::IncompleteHeader`] - empty input
/// - [`OdriveCryptError::UnsupportedVersion`] - anything other than `'1'`
pub fn read_version<R: Read>(mut reader: R) -> Result<u8, OdriveCryptError> {
    let mut version = [0u8; VERSION_SIZE];
    match reader.read_exact(&mut version) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(OdriveCryptError::IncompleteHeader { received: 0 });
        }
        Err(e) => return Err(OdriveCryptError::Io(e)),
    }

    if version[0] != SUPPORTED_VERSION {
        return Err(OdriveCryptError::UnsupportedVersion(version[0]));
    }
    Ok(version[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_header() -> Vec<u8> {
        let mut bytes = vec![b'1'];
        bytes.extend_from_slice(&[0xAA; SALT_SIZE]);
        bytes.extend((0u8..16).map(|i| 0x40 + i));
        bytes
    }

    #[test]
    fn parse_splits_fields() {
        let bytes: [u8; HEADER_SIZE] = sample_header().try_into().unwrap();
        let header = Header::parse(&bytes).unwrap();
        assert_eq!(header.version(), b'1');
        assert_eq!(header.salt().expose_secret(), &[0xAA; 8]);
        assert_eq!(header.iv().expose_secret()[0], 0x40);
        assert_eq!(header.iv().expose_secret()[15], 0x4F);
    }

    #[test]
    fn parse_rejects_other_versions() {
        let mut bytes: [u8; HEADER_SIZE] = sample_header().try_into().unwrap();
        for version in [0u8, 1, b'0', b'2', 0xFF] {
            bytes[0] = version;
            match Header::parse(&bytes) {
                Err(OdriveCryptError::UnsupportedVersion(v)) => assert_eq!(v, version),
                _ => panic!("version {version:#04x} should be rejected"),
            }
        }
    }

    #[test]
    fn assembler_byte_by_byte() {
        let bytes = sample_header();
        let mut assembler = HeaderAssembler::new();
        for (i, b) in bytes.iter().enumerate() {
            assert!(!assembler.is_complete());
            assert_eq!(assembler.received(), i);
            assert_eq!(assembler.push(std::slice::from_ref(b)), 1);
        }
        assert!(assembler.is_complete());
        assert_eq!(assembler.push(b"body"), 0);
        assert_eq!(assembler.finish().unwrap().salt().expose_secret(), &[0xAA; 8]);
    }

    #[test]
    fn assembler_reports_partial_header() {
        let mut assembler = HeaderAssembler::new();
        assembler.push(&sample_header()[..10]);
        match assembler.finish() {
            Err(OdriveCryptError::IncompleteHeader { received }) => assert_eq!(received, 10),
            _ => panic!("expected IncompleteHeader"),
        }
    }

    #[test]
    fn read_header_leaves_body_unread() {
        let mut data = sample_header();
        data.extend_from_slice(b"ciphertext");
        let mut cursor = Cursor::new(data);
        read_header(&mut cursor).unwrap();
        assert_eq!(cursor.position(), HEADER_SIZE as u64);
    }

    #[test]
    fn read_header_short_input() {
        let err = read_header(Cursor::new(&sample_header()[..24])).err().unwrap();
        assert_eq!(err.to_string(), "Incomplete header: received 24 of 25 bytes");
    }

    #[test]
    fn read_version_empty_input() {
        let err = read_version(Cursor::new(b"")).unwrap_err();
        assert!(matches!(err, OdriveCryptError::IncompleteHeader { received: 0 }));
    }
}
