//! Little-endian cursor over the page payload.

use super::error::DecodeError;

pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Start reading `bytes` at `offset`.
    pub const fn new(bytes: &'a [u8], offset: usize) -> Self {
        Self { bytes, pos: offset }
    }

    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        self.take::<4>().map(i32::from_le_bytes)
    }

    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        self.take::<4>().map(f32::from_le_bytes)
    }

    /// Read a count field; negative counts mean "no records".
    pub fn read_count(&mut self) -> Result<u32, DecodeError> {
        self.read_i32().map(|n| n.max(0) as u32)
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let end = self.pos.checked_add(N).filter(|&end| end <= self.bytes.len());
        let Some(end) = end else {
            return Err(DecodeError::Truncated {
                offset: self.pos,
                needed: N,
                len: self.bytes.len(),
            });
        };

        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.bytes[self.pos..end]);
        self.pos = end;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_little_endian() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(-7i32).to_le_bytes());
        bytes.extend_from_slice(&1.5f32.to_le_bytes());

        let mut reader = ByteReader::new(&bytes, 0);
        assert_eq!(reader.read_i32(), Ok(-7));
        assert_eq!(reader.read_f32(), Ok(1.5));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_read_with_offset() {
        let bytes = [0xff, 0xff, 2, 0, 0, 0];
        let mut reader = ByteReader::new(&bytes, 2);
        assert_eq!(reader.read_i32(), Ok(2));
        assert_eq!(reader.position(), 6);
    }

    #[test]
    fn test_truncated() {
        let bytes = [1, 0, 0];
        let mut reader = ByteReader::new(&bytes, 0);
        assert_eq!(
            reader.read_i32(),
            Err(DecodeError::Truncated {
                offset: 0,
                needed: 4,
                len: 3
            })
        );
        // A failed read does not advance
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_negative_count() {
        let bytes = (-3i32).to_le_bytes();
        let mut reader = ByteReader::new(&bytes, 0);
        assert_eq!(reader.read_count(), Ok(0));
    }
}
