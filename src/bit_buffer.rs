//! Packed bit storage
//!
//! [`BitBuffer`] appends bits most-significant-first into a byte vector; the
//! final partial byte is zero-filled. [`BitCursor`] reads them back through a
//! big-endian `bitstream_io` reader with a bit-exact end boundary, which is
//! what lets the decoder confine tree parsing to its declared section.

use bitstream_io::{BigEndian, BitRead, BitReader};

use crate::error::CodecError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bytes: Vec<u8>,
    len: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Wraps already-packed bytes; every bit of every byte counts.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let len = bytes.len() * 8;
        Self { bytes, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push_bit(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> offset;
        }
        self.len += 1;
    }

    /// Appends the low `count` bits of `value`, most significant first.
    pub fn push_bits(&mut self, value: u64, count: u32) {
        debug_assert!(count <= 64);
        for shift in (0..count).rev() {
            self.push_bit((value >> shift) & 1 == 1);
        }
    }

    pub fn extend_from(&mut self, other: &BitBuffer) {
        if self.len % 8 == 0 {
            self.bytes.extend_from_slice(&other.bytes);
            self.len += other.len;
            return;
        }
        for bit in other.iter() {
            self.push_bit(bit);
        }
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bytes[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bytes[i / 8] & (0x80 >> (i % 8)) != 0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn cursor(&self) -> BitCursor<'_> {
        BitCursor::with_len(&self.bytes, self.len)
    }
}

impl FromIterator<bool> for BitBuffer {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut buffer = BitBuffer::new();
        for bit in iter {
            buffer.push_bit(bit);
        }
        buffer
    }
}

/// Forward-only reader over packed bits with a movable end limit.
pub struct BitCursor<'a> {
    reader: BitReader<&'a [u8], BigEndian>,
    position: usize,
    limit: usize,
}

impl<'a> BitCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_len(bytes, bytes.len() * 8)
    }

    pub fn with_len(bytes: &'a [u8], bit_len: usize) -> Self {
        Self {
            reader: BitReader::endian(bytes, BigEndian),
            position: 0,
            limit: bit_len.min(bytes.len() * 8),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Moves the end boundary and returns the previous one. The new limit is
    /// clamped so it never falls behind the current position.
    pub fn set_limit(&mut self, limit: usize) -> usize {
        let previous = self.limit;
        self.limit = limit.max(self.position);
        previous
    }

    fn ensure(&self, needed: usize) -> Result<(), CodecError> {
        if needed > self.remaining() {
            return Err(CodecError::OutOfBits {
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    pub fn read_bit(&mut self) -> Result<bool, CodecError> {
        self.ensure(1)?;
        let bit = self.reader.read_bit()?;
        self.position += 1;
        Ok(bit)
    }

    /// Reads `count` (1..=32) bits as a big-endian unsigned integer.
    pub fn read_bits(&mut self, count: u32) -> Result<u32, CodecError> {
        debug_assert!((1..=32).contains(&count));
        self.ensure(count as usize)?;
        let value = self.reader.read::<u32>(count)?;
        self.position += count as usize;
        Ok(value)
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_bits(8)? as u8)
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        self.read_bits(32)
    }

    pub fn skip(&mut self, bits: usize) -> Result<(), CodecError> {
        self.ensure(bits)?;
        let mut left = bits;
        while left > 0 {
            let step = left.min(u32::MAX as usize);
            self.reader.skip(step as u32)?;
            left -= step;
        }
        self.position += bits;
        Ok(())
    }
}
