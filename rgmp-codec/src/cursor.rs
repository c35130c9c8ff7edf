//! Read position over an input buffer
//!
//! Every decoding step reads through one `Cursor`, passed by `&mut`. Offsets
//! reported in errors are absolute positions in the buffer the cursor was
//! created over.

use rgmp_core::{RgmpError, RgmpResult};

/// Bounds-checked reader over a byte buffer
///
/// # Position Tracking
///
/// The cursor keeps a single position that only moves forward. Reads that
/// would run past the end of the buffer fail with `BufferExhausted` and leave
/// the position unchanged.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `buffer`
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Current position in the buffer
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total length of the underlying buffer
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the underlying buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Bytes left after the current position
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Check if there is more data to read
    pub fn has_remaining(&self) -> bool {
        self.position < self.buffer.len()
    }

    /// Unread part of the buffer
    pub fn rest(&self) -> &'a [u8] {
        &self.buffer[self.position.min(self.buffer.len())..]
    }

    fn ensure(&self, count: usize) -> RgmpResult<()> {
        if count > self.remaining() {
            return Err(RgmpError::BufferExhausted {
                offset: self.position,
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Return the byte at the current position without advancing
    pub fn peek_u8(&self) -> RgmpResult<u8> {
        self.ensure(1)?;
        Ok(self.buffer[self.position])
    }

    /// Read one byte
    pub fn read_u8(&mut self) -> RgmpResult<u8> {
        let byte = self.peek_u8()?;
        self.position += 1;
        Ok(byte)
    }

    /// Read a big-endian `u16`
    pub fn read_u16_be(&mut self) -> RgmpResult<u16> {
        let bytes = self.read_array::<2>()?;
        Ok(u16::from_be_bytes(bytes))
    }

    /// Read `count` bytes
    ///
    /// # Returns
    /// A slice of the underlying buffer; nothing is copied.
    pub fn read_bytes(&mut self, count: usize) -> RgmpResult<&'a [u8]> {
        self.ensure(count)?;
        let start = self.position;
        self.position += count;
        Ok(&self.buffer[start..start + count])
    }

    /// Read exactly `N` bytes into an array
    pub fn read_array<const N: usize>(&mut self) -> RgmpResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Advance `count` bytes without looking at them
    pub fn skip(&mut self, count: usize) -> RgmpResult<()> {
        self.ensure(count)?;
        self.position += count;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_reads() {
        let data = [0x00, 0x2a, 0x60, 1, 2, 3, 4];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_u16_be().unwrap(), 42);
        assert_eq!(cursor.read_u8().unwrap(), 0x60);
        cursor.skip(2).unwrap();
        assert_eq!(cursor.read_bytes(2).unwrap(), &[3, 4]);
        assert!(!cursor.has_remaining());
        assert_eq!(cursor.position(), 7);
    }

    #[test]
    fn test_exhausted_read_keeps_position() {
        let data = [1, 2, 3];
        let mut cursor = Cursor::new(&data);
        cursor.read_u8().unwrap();
        let err = cursor.read_bytes(3).unwrap_err();
        assert_eq!(
            err,
            RgmpError::BufferExhausted {
                offset: 1,
                needed: 3,
                available: 2
            }
        );
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.rest(), &[2, 3]);
    }

    #[test]
    fn test_read_array() {
        let data = *b"000000000001xyz";
        let mut cursor = Cursor::new(&data);
        let serial: [u8; 12] = cursor.read_array().unwrap();
        assert_eq!(&serial, b"000000000001");
        assert_eq!(cursor.remaining(), 3);
    }

    #[test]
    fn test_empty_buffer() {
        let mut cursor = Cursor::new(&[]);
        assert!(cursor.is_empty());
        assert!(cursor.peek_u8().is_err());
        assert!(cursor.read_u8().is_err());
        assert!(cursor.skip(0).is_ok());
    }
}
