use super::PostProcess;
use crate::carry::CarryBuffer;
use crate::consts::{FILENAME_PREFIX, FILENAME_PREFIX_SIZE};
use crate::error::OdriveCryptError;
use subtle::ConstantTimeEq;

/// Filename post-processor: consume and check the 4-byte zero prefix.
///
/// The prefix can arrive split over several chunks. Bytes are checked as
/// soon as they are seen, so a bad canary fails on the chunk that carries
/// its first non-zero byte.
#[derive(Default)]
pub struct FilenamePrefix {
    prefix: CarryBuffer<FILENAME_PREFIX_SIZE>,
}

impl FilenamePrefix {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix bytes validated so far (0..=4).
    #[must_use]
    pub const fn validated(&self) -> usize {
        self.prefix.len()
    }
}

impl PostProcess for FilenamePrefix {
    fn process(&mut self, mut data: Vec<u8>) -> Result<Vec<u8>, OdriveCryptError> {
        if self.prefix.is_full() {
            return Ok(data);
        }

        let taken = self.prefix.fill_from(&data);
        let seen = self.prefix.as_slice();
        if !bool::from(seen.ct_eq(&FILENAME_PREFIX[..seen.len()])) {
            return Err(OdriveCryptError::InvalidPrefix);
        }

        data.drain(..taken);
        Ok(data)
    }

    fn finalize(&mut self, data: Vec<u8>) -> Result<Vec<u8>, OdriveCryptError> {
        let name = self.process(data)?;
        if !self.prefix.is_full() {
            return Err(OdriveCryptError::InvalidPrefix);
        }
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prefix_in_one_chunk() {
        let mut post = FilenamePrefix::new();
        let out = post.process(b"\0\0\0\0notes.md".to_vec()).unwrap();
        assert_eq!(out, b"notes.md");
        assert_eq!(post.validated(), 4);
        assert_eq!(post.finalize(Vec::new()).unwrap(), b"");
    }

    #[test]
    fn prefix_split_across_chunks() {
        let mut post = FilenamePrefix::new();
        assert!(post.process(vec![0]).unwrap().is_empty());
        assert!(post.process(vec![0, 0]).unwrap().is_empty());
        assert_eq!(post.validated(), 3);
        assert_eq!(post.process(b"\0ab".to_vec()).unwrap(), b"ab");
        assert_eq!(post.process(b"\0\0".to_vec()).unwrap(), b"\0\0");
        assert_eq!(post.finalize(b"c".to_vec()).unwrap(), b"c");
    }

    #[test]
    fn non_zero_prefix_fails_early() {
        let mut post = FilenamePrefix::new();
        post.process(vec![0]).unwrap();
        assert!(matches!(
            post.process(vec![0, 7]),
            Err(OdriveCryptError::InvalidPrefix)
        ));
    }

    #[test]
    fn short_prefix_fails_on_finalize() {
        let mut post = FilenamePrefix::new();
        post.process(vec![0, 0]).unwrap();
        assert!(matches!(
            post.finalize(Vec::new()),
            Err(OdriveCryptError::InvalidPrefix)
        ));
    }
}
