use crate::std::vec;
use crate::std::vec::Vec;

/// A sequence of bits not constrained to byte-aligned boundaries.
///
/// Bits are stored most significant first within each byte. The structure
/// supports bit-level appends, indexed reads, and slicing into fixed-width
/// chunks, which is all the barcode encoder and the block renderer need.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bitstream {
    data: Vec<u8>,
    bit_len: usize,
}

impl Bitstream {
    /// An empty bitstream.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty bitstream with space reserved for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            data: Vec::with_capacity(bits.div_ceil(8)),
            bit_len: 0,
        }
    }

    /// A bitstream of `len` zero bits.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![0; len.div_ceil(8)],
            bit_len: len,
        }
    }

    /// Append a single bit.
    pub fn push_bit(&mut self, bit: bool) {
        if self.bit_len % 8 == 0 {
            self.data.push(0);
        }
        if bit {
            let last = self.data.len() - 1;
            self.data[last] |= 0x80 >> (self.bit_len % 8);
        }
        self.bit_len += 1;
    }

    /// Append the lowest `width` bits of `value`, most significant first.
    ///
    /// `width` must be at most 16 and `value` must fit in `width` bits.
    pub fn push(&mut self, value: u16, width: usize) {
        debug_assert!(width <= 16);
        debug_assert!(width == 16 || value < 1 << width);
        for i in (0..width).rev() {
            self.push_bit(value & (1 << i) != 0);
        }
    }

    /// Append all bits of `other`.
    pub fn extend_from(&mut self, other: &Bitstream) {
        for i in 0..other.bit_len {
            self.push_bit(other.get(i) == Some(true));
        }
    }

    /// The bit at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        (index < self.bit_len).then(|| self.data[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Total number of bits.
    pub fn len(&self) -> usize {
        self.bit_len
    }

    /// Whether no bits have been pushed.
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Iterate over the bits in `width`-wide chunks, most significant bit
    /// first within each chunk.
    ///
    /// A final chunk shorter than `width` is padded with zero bits.
    pub fn chunks(&self, width: usize) -> Chunks<'_> {
        debug_assert!((1..=16).contains(&width));
        Chunks {
            bits: self,
            width,
            pos: 0,
        }
    }

    /// The bits packed into bytes, the last byte zero-padded.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Iterator over fixed-width chunks of a [Bitstream], see
/// [`chunks`](Bitstream::chunks).
pub struct Chunks<'a> {
    bits: &'a Bitstream,
    width: usize,
    pos: usize,
}

impl Iterator for Chunks<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        if self.pos >= self.bits.len() {
            return None;
        }
        let mut value = 0;
        for i in 0..self.width {
            value <<= 1;
            if self.bits.get(self.pos + i) == Some(true) {
                value |= 1;
            }
        }
        self.pos += self.width;
        Some(value)
    }
}

#[test]
fn test_push_and_len() {
    let mut bits = Bitstream::new();
    bits.push(0b110, 3);
    assert_eq!(bits.len(), 3);
    bits.push(0b10010000, 8);
    bits.push_bit(true);
    assert_eq!(bits.len(), 12);
    assert_eq!(bits.into_bytes(), vec![0b1101_0010, 0b0001_0000]);
}

#[test]
fn test_get() {
    let mut bits = Bitstream::new();
    bits.push(0b101, 3);
    assert_eq!(bits.get(0), Some(true));
    assert_eq!(bits.get(1), Some(false));
    assert_eq!(bits.get(2), Some(true));
    assert_eq!(bits.get(3), None);
}

#[test]
fn test_zeros() {
    let bits = Bitstream::zeros(11);
    assert_eq!(bits.len(), 11);
    assert!((0..11).all(|i| bits.get(i) == Some(false)));
}

#[test]
fn test_extend_from() {
    let mut bits = Bitstream::new();
    bits.push(0b11011, 5);
    let mut tail = Bitstream::new();
    tail.push(0b0101, 4);
    bits.extend_from(&tail);
    assert_eq!(bits.len(), 9);
    assert_eq!(bits.into_bytes(), vec![0b1101_1010, 0b1000_0000]);
}

#[test]
fn test_chunks_pad_final() {
    let mut bits = Bitstream::new();
    bits.push(0b11010010000, 11);
    bits.push(0b110, 3);
    let chunks: Vec<u16> = bits.chunks(11).collect();
    // the trailing 3 bits come back as a zero-padded 11-bit chunk
    assert_eq!(chunks, vec![0b11010010000, 0b11000000000]);
    assert_eq!(bits.chunks(2).count(), 7);
}
