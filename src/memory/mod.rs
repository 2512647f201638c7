//! Sparse Backing Memory.
//!
//! The system of record for every byte ever stored. Writes always land here
//! regardless of what the cache does with them; caches read from it only
//! when importing a block after a miss.

use crate::common::data_bytes;
use std::collections::HashMap;

/// Byte-addressable store over the full 32-bit address space.
///
/// Only written addresses occupy space. Entries live for the whole run.
#[derive(Clone, Debug, Default)]
pub struct BackingMemory {
    bytes: HashMap<u32, u8>,
}

impl BackingMemory {
    /// Creates an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` at consecutive addresses starting at `addr`.
    ///
    /// The value is split least-significant byte first (see
    /// [`data_bytes`]). Addresses wrap at the top of the address space.
    ///
    /// # Returns
    ///
    /// The number of bytes written (at least 1).
    pub fn write(&mut self, addr: u32, data: u32) -> usize {
        let mut written = 0;
        for (i, byte) in data_bytes(data).enumerate() {
            self.write_byte(addr.wrapping_add(i as u32), byte);
            written += 1;
        }
        written
    }

    /// Stores a single byte.
    pub fn write_byte(&mut self, addr: u32, byte: u8) {
        self.bytes.insert(addr, byte);
    }

    /// Reads a single byte. `None` means the address was never written.
    pub fn read(&self, addr: u32) -> Option<u8> {
        self.bytes.get(&addr).copied()
    }

    /// Reads `len` bytes starting at `base`. Never-written bytes read as 0
    /// and are not materialized.
    pub fn read_block(&self, base: u32, len: usize) -> Vec<u8> {
        (0..len)
            .map(|i| self.read(base.wrapping_add(i as u32)).unwrap_or(0))
            .collect()
    }

    /// Returns `true` if `addr` has been written.
    pub fn contains(&self, addr: u32) -> bool {
        self.bytes.contains_key(&addr)
    }

    /// Number of written addresses.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
