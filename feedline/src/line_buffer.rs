//! Edit buffer for the line being typed.

/// Backing storage for [`LineBuffer`].
///
/// Implementations only move bytes around; bounds and capacity checks
/// live in [`LineBuffer`].
pub trait Buffer {
    fn buffer_len(&self) -> usize;

    /// `None` means unbounded.
    fn capacity(&self) -> Option<usize>;

    fn truncate_buffer(&mut self, len: usize);
    fn insert_byte(&mut self, index: usize, byte: u8);
    fn remove_byte(&mut self, index: usize) -> u8;
    fn as_slice(&self) -> &[u8];
}

/// Fixed-capacity buffer over caller-supplied storage.
pub struct SliceBuffer<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> SliceBuffer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }
}

impl Buffer for SliceBuffer<'_> {
    fn buffer_len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.buf.len())
    }

    fn truncate_buffer(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
        }
    }

    fn insert_byte(&mut self, index: usize, byte: u8) {
        debug_assert!(index <= self.len && self.len < self.buf.len());

        self.buf.copy_within(index..self.len, index + 1);
        self.buf[index] = byte;
        self.len += 1;
    }

    fn remove_byte(&mut self, index: usize) -> u8 {
        debug_assert!(index < self.len);

        let byte = self.buf[index];
        self.buf.copy_within(index + 1..self.len, index);
        self.len -= 1;

        byte
    }

    fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// Line buffer with in-place editing.
///
/// Insertions past capacity are rejected with `Err` and leave the
/// buffer untouched.
pub struct LineBuffer<B: Buffer> {
    buf: B,
}

impl<B: Buffer> LineBuffer<B> {
    pub fn with_buffer(buf: B) -> Self {
        Self { buf }
    }

    pub fn as_slice(&self) -> &[u8] {
        self.buf.as_slice()
    }

    pub fn len(&self) -> usize {
        self.buf.buffer_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_full(&self) -> bool {
        self.buf
            .capacity()
            .is_some_and(|capacity| self.len() >= capacity)
    }

    pub fn insert(&mut self, index: usize, byte: u8) -> Result<(), ()> {
        if self.is_full() {
            return Err(());
        }

        self.buf.insert_byte(index, byte);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> u8 {
        self.buf.remove_byte(index)
    }

    pub fn clear(&mut self) {
        self.buf.truncate_buffer(0);
    }

    /// Replace the whole line, truncating to capacity if needed.
    pub fn set(&mut self, line: &[u8]) {
        self.buf.truncate_buffer(0);

        for &byte in line {
            if self.insert(self.len(), byte).is_err() {
                break;
            }
        }
    }

    /// Bytes from `index` to the end of the line.
    pub fn tail(&self, index: usize) -> &[u8] {
        &self.as_slice()[index..]
    }
}

#[cfg(any(test, feature = "std"))]
mod feature_std {
    use super::*;
    use std::vec::Vec;

    /// Growable buffer with no fixed capacity.
    #[derive(Default)]
    pub struct UnboundedBuffer {
        buf: Vec<u8>,
    }

    impl UnboundedBuffer {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl Buffer for UnboundedBuffer {
        fn buffer_len(&self) -> usize {
            self.buf.len()
        }

        fn capacity(&self) -> Option<usize> {
            None
        }

        fn truncate_buffer(&mut self, len: usize) {
            self.buf.truncate(len)
        }

        fn insert_byte(&mut self, index: usize, byte: u8) {
            self.buf.insert(index, byte);
        }

        fn remove_byte(&mut self, index: usize) -> u8 {
            self.buf.remove(index)
        }

        fn as_slice(&self) -> &[u8] {
            self.buf.as_slice()
        }
    }
}

#[cfg(any(test, feature = "std"))]
pub use feature_std::UnboundedBuffer;
