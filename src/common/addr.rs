//! Address Decomposition.
//!
//! Splits a 32-bit byte address into the fields a cache uses to locate a
//! byte: the offset within a line, the index of the home line (direct-mapped
//! only) and the tag stored alongside the line.
//!
//! Both the line size and the line count are powers of two; the
//! configuration boundary enforces this before a layout is ever built.

/// Bit layout derived from a cache geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressLayout {
    /// log2 of the line size in bytes.
    offset_bits: u32,
    /// log2 of the number of lines.
    index_bits: u32,
}

impl AddressLayout {
    /// Creates a layout for `line_count` lines of `line_size` bytes each.
    ///
    /// # Arguments
    ///
    /// * `line_count` - Number of cache lines (power of two).
    /// * `line_size` - Bytes per line (power of two).
    pub fn new(line_count: u32, line_size: u32) -> Self {
        Self {
            offset_bits: line_size.trailing_zeros(),
            index_bits: line_count.trailing_zeros(),
        }
    }

    /// Number of offset bits.
    pub fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Number of index bits.
    pub fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Bytes per line.
    pub fn line_size(&self) -> usize {
        1usize << self.offset_bits
    }

    /// Byte position of `addr` inside its line.
    pub fn offset(&self, addr: u32) -> usize {
        (addr & low_mask(self.offset_bits)) as usize
    }

    /// Home line of `addr` in a direct-mapped cache.
    pub fn index(&self, addr: u32) -> usize {
        (shr(addr, self.offset_bits) & low_mask(self.index_bits)) as usize
    }

    /// Tag of `addr` in a direct-mapped cache (bits above index and offset).
    pub fn direct_tag(&self, addr: u32) -> u32 {
        shr(addr, self.offset_bits + self.index_bits)
    }

    /// Tag of `addr` in a fully-associative cache (the block number).
    pub fn block_tag(&self, addr: u32) -> u32 {
        shr(addr, self.offset_bits)
    }

    /// First address of the block containing `addr`.
    pub fn block_base(&self, addr: u32) -> u32 {
        addr & !low_mask(self.offset_bits)
    }
}

/// Logical right shift that yields 0 once the shift covers the whole word.
fn shr(value: u32, bits: u32) -> u32 {
    value.checked_shr(bits).unwrap_or(0)
}

/// Mask with the lowest `bits` bits set.
fn low_mask(bits: u32) -> u32 {
    if bits >= 32 {
        u32::MAX
    } else {
        (1u32 << bits) - 1
    }
}
