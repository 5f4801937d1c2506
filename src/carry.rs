//! src/carry.rs
//! Fixed-capacity byte accumulator for data that straddles chunk boundaries.
//!
//! Used for the header (25), the AES partial block (16), the file trailer
//! window (32) and the filename prefix (4). Storage is a secure-gate buffer,
//! so whatever was carried is wiped when the accumulator is dropped.

use crate::aliases::SpanBuffer;

/// Holds up to `N` bytes carried over between `update` calls.
pub struct CarryBuffer<const N: usize> {
    bytes: SpanBuffer<N>,
    len: usize,
}

impl<const N: usize> CarryBuffer<N> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: SpanBuffer::<N>::new([0u8; N]),
            len: 0,
        }
    }

    /// Capacity `N`.
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Bytes still needed to fill the buffer.
    #[inline(always)]
    pub const fn remaining(&self) -> usize {
        N - self.len
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes.expose_secret()[..self.len]
    }

    /// The full buffer, once it has been filled.
    #[inline(always)]
    pub fn as_array(&self) -> Option<&[u8; N]> {
        self.is_full().then(|| self.bytes.expose_secret())
    }

    /// Copy as many bytes from the front of `input` as still fit.
    ///
    /// Returns how many bytes were taken; the caller continues at
    /// `&input[taken..]`.
    pub fn fill_from(&mut self, input: &[u8]) -> usize {
        let taken = self.remaining().min(input.len());
        self.bytes.expose_secret_mut()[self.len..self.len + taken]
            .copy_from_slice(&input[..taken]);
        self.len += taken;
        taken
    }

    /// Slide `input` through the buffer, keeping the newest `N` bytes.
    ///
    /// Conceptually `carried ‖ input` is split into everything but the last
    /// `N` bytes, which is appended to `released` oldest-first, and the last
    /// (up to) `N` bytes, which become the new carried contents.
    pub fn shift_in(&mut self, input: &[u8], released: &mut Vec<u8>) {
        let overflow = (self.len + input.len()).saturating_sub(N);

        let from_carried = overflow.min(self.len);
        if from_carried > 0 {
            let buf = self.bytes.expose_secret_mut();
            released.extend_from_slice(&buf[..from_carried]);
            buf.copy_within(from_carried..self.len, 0);
            self.len -= from_carried;
        }

        let from_input = overflow - from_carried;
        released.extend_from_slice(&input[..from_input]);

        // Whatever is left fits by construction: len + rest == min(N, total)
        self.fill_from(&input[from_input..]);
    }

    /// Forget the carried bytes and zero the storage.
    pub fn clear(&mut self) {
        self.bytes.expose_secret_mut().fill(0);
        self.len = 0;
    }
}

impl<const N: usize> Default for CarryBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
