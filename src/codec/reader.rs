use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// Bounds-checked sequential reader over a map buffer
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail with `OutOfBounds` unless `n` more bytes are available
    fn require(&self, n: usize) -> Result<()> {
        if self.remaining() < n {
            return Err(Error::OutOfBounds {
                need: n,
                have: self.remaining(),
                offset: self.pos,
            });
        }
        Ok(())
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.require(n)?;
        self.pos += n;
        Ok(())
    }

    pub fn read_fixed_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.require(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a 4-byte tag (FourCC / magic)
    pub fn read_tag(&mut self) -> Result<[u8; 4]> {
        let bytes = self.read_fixed_bytes(4)?;
        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_fixed_bytes(1)?[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.read_fixed_bytes(2)?))
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.read_fixed_bytes(4)?))
    }

    pub fn read_u32_be(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.read_fixed_bytes(4)?))
    }

    /// Read a fixed-length ASCII field, dropping trailing NUL padding
    pub fn read_padded_string(&mut self, n: usize) -> Result<String> {
        let bytes = self.read_fixed_bytes(n)?;
        Ok(String::from_utf8_lossy(bytes).trim_end_matches('\0').to_string())
    }

    /// Read remaining bytes
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let slice = &self.data[self.pos..];
        self.pos = self.data.len();
        slice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x00, 0x00, 0x01, 0x02];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.read_u16_le().unwrap(), 0x0201);
        assert_eq!(cursor.read_u32_le().unwrap(), 0x06050403);
        assert_eq!(cursor.read_u32_be().unwrap(), 0x00000102);
        assert!(cursor.is_empty());
        assert_eq!(cursor.position(), 10);
    }

    #[test]
    fn test_out_of_bounds_does_not_advance() {
        let data = [0xAA, 0xBB, 0xCC];
        let mut cursor = ByteCursor::new(&data);
        cursor.skip(1).unwrap();

        let err = cursor.read_u32_le().unwrap_err();
        match err {
            Error::OutOfBounds { need, have, offset } => {
                assert_eq!(need, 4);
                assert_eq!(have, 2);
                assert_eq!(offset, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.read_u16_le().unwrap(), 0xCCBB);
    }

    #[test]
    fn test_skip_past_end() {
        let mut cursor = ByteCursor::new(&[0u8; 4]);
        assert!(cursor.skip(5).unwrap_err().is_out_of_bounds());
        assert_eq!(cursor.remaining(), 4);
    }

    #[test]
    fn test_padded_string() {
        let data = b"Garden\0\0\0\0";
        let mut cursor = ByteCursor::new(data);
        assert_eq!(cursor.read_padded_string(10).unwrap(), "Garden");
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_read_tag() {
        let mut cursor = ByteCursor::new(b"DIM \x04\x00");
        assert_eq!(&cursor.read_tag().unwrap(), b"DIM ");
        assert_eq!(cursor.read_remaining(), &[0x04, 0x00]);
    }
}
