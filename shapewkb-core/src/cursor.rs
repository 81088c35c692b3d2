//! Byte-order aware reader over a borrowed WKB buffer.
//!
//! Reads are relative to a running `adjustment` that decoders advance
//! explicitly once they have consumed an element; a read never moves it.

use crate::error::{Result, ShapeWkbError};
use crate::wkb::ByteOrder;

#[derive(Debug, Clone)]
pub struct WkbCursor<'a> {
    buf: &'a [u8],
    order: ByteOrder,
    adjustment: usize,
}

impl<'a> WkbCursor<'a> {
    pub fn new(buf: &'a [u8], order: ByteOrder) -> Self {
        Self {
            buf,
            order,
            adjustment: 0,
        }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    pub fn set_byte_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    /// Bytes consumed so far.
    pub fn adjustment(&self) -> usize {
        self.adjustment
    }

    pub fn advance(&mut self, len: usize) {
        self.adjustment += len;
    }

    pub fn buffer_len(&self) -> usize {
        self.buf.len()
    }

    /// Check that `len` bytes starting at `offset` are inside the buffer.
    pub fn ensure(&self, offset: usize, len: usize) -> Result<()> {
        self.range(offset, len).map(|_| ())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8> {
        let [b] = self.bytes::<1>(offset)?;
        Ok(b)
    }

    pub fn read_u32(&self, offset: usize) -> Result<u32> {
        let bytes = self.bytes::<4>(offset)?;
        Ok(match self.order {
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
        })
    }

    pub fn read_i32(&self, offset: usize) -> Result<i32> {
        let bytes = self.bytes::<4>(offset)?;
        Ok(match self.order {
            ByteOrder::LittleEndian => i32::from_le_bytes(bytes),
            ByteOrder::BigEndian => i32::from_be_bytes(bytes),
        })
    }

    pub fn read_f64(&self, offset: usize) -> Result<f64> {
        let bytes = self.bytes::<8>(offset)?;
        Ok(match self.order {
            ByteOrder::LittleEndian => f64::from_le_bytes(bytes),
            ByteOrder::BigEndian => f64::from_be_bytes(bytes),
        })
    }

    /// Read an element or point count as `usize`.
    pub(crate) fn read_count(&self, offset: usize) -> Result<usize> {
        // u32 always fits in usize on the supported targets
        Ok(self.read_u32(offset)? as usize)
    }

    fn bytes<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let range = self.range(offset, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[range]);
        Ok(out)
    }

    fn range(&self, offset: usize, len: usize) -> Result<std::ops::Range<usize>> {
        let out_of_bounds = || ShapeWkbError::BufferBounds {
            offset: self.adjustment.saturating_add(offset),
            len,
            available: self.buf.len(),
        };
        let start = self
            .adjustment
            .checked_add(offset)
            .ok_or_else(out_of_bounds)?;
        let end = start.checked_add(len).ok_or_else(out_of_bounds)?;
        if end > self.buf.len() {
            return Err(out_of_bounds());
        }
        Ok(start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_respect_byte_order() {
        let mut blob = Vec::new();
        blob.extend_from_slice(&7u32.to_be_bytes());
        blob.extend_from_slice(&1.5f64.to_be_bytes());

        let mut cursor = WkbCursor::new(&blob, ByteOrder::BigEndian);
        assert_eq!(cursor.read_u32(0).unwrap(), 7);
        assert_eq!(cursor.read_i32(0).unwrap(), 7);
        assert_eq!(cursor.read_f64(4).unwrap(), 1.5);

        cursor.set_byte_order(ByteOrder::LittleEndian);
        assert_eq!(cursor.read_u32(0).unwrap(), 7u32.swap_bytes());
    }

    #[test]
    fn reads_are_relative_to_adjustment() {
        let mut blob = vec![0xAA; 3];
        blob.extend_from_slice(&42u32.to_le_bytes());

        let mut cursor = WkbCursor::new(&blob, ByteOrder::LittleEndian);
        cursor.advance(3);
        assert_eq!(cursor.read_u32(0).unwrap(), 42);
        assert_eq!(cursor.adjustment(), 3);
        // reading does not move the cursor
        assert_eq!(cursor.read_u32(0).unwrap(), 42);
        assert_eq!(cursor.adjustment(), 3);
    }

    #[test]
    fn out_of_range_read_is_buffer_bounds() {
        let blob = [0u8; 6];
        let cursor = WkbCursor::new(&blob, ByteOrder::LittleEndian);
        match cursor.read_f64(0) {
            Err(ShapeWkbError::BufferBounds {
                offset,
                len,
                available,
            }) => {
                assert_eq!(offset, 0);
                assert_eq!(len, 8);
                assert_eq!(available, 6);
            }
            other => panic!("expected BufferBounds, got {other:?}"),
        }
        assert!(cursor.read_u32(3).is_err());
        assert!(cursor.read_u32(2).is_ok());
    }

    #[test]
    fn ensure_guards_overflowing_lengths() {
        let blob = [0u8; 16];
        let cursor = WkbCursor::new(&blob, ByteOrder::LittleEndian);
        assert!(cursor.ensure(0, 16).is_ok());
        assert!(cursor.ensure(1, 16).is_err());
        assert!(cursor.ensure(usize::MAX, 2).is_err());
    }
}
