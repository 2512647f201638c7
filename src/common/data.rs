//! Memory Request Types.
//!
//! This module defines the request stream consumed by the simulated caches
//! and the rule that turns a 32-bit store value into the bytes written to
//! consecutive addresses.

/// Value returned by a read that found the data neither in the cache nor
/// in backing memory.
pub const INVALID_DATA: u32 = 0xFFFF_FFFF;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Data read access.
    Read,

    /// Data write access.
    Write,
}

/// A single memory request issued to the active cache.
///
/// Requests are immutable once read from the input; their order is the
/// issue order. `data` is always 0 for reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Request {
    /// Byte address of the access.
    pub address: u32,
    /// Value to store (writes only).
    pub data: u32,
    /// Whether the request is a store.
    pub is_write: bool,
}

impl Request {
    /// Creates a read request.
    pub fn read(address: u32) -> Self {
        Self {
            address,
            data: 0,
            is_write: false,
        }
    }

    /// Creates a write request.
    pub fn write(address: u32, data: u32) -> Self {
        Self {
            address,
            data,
            is_write: true,
        }
    }

    /// Returns the access type of this request.
    pub fn access_type(&self) -> AccessType {
        if self.is_write {
            AccessType::Write
        } else {
            AccessType::Read
        }
    }
}

/// Splits a store value into the bytes written to memory.
///
/// Bytes are produced least-significant first, one per 8 significant bits
/// of `data`, with a minimum of one byte so that storing 0 still writes.
///
/// # Examples
///
/// ```
/// use cache_sim::common::data_bytes;
///
/// assert_eq!(data_bytes(0).collect::<Vec<_>>(), vec![0]);
/// assert_eq!(data_bytes(0x1234).collect::<Vec<_>>(), vec![0x34, 0x12]);
/// ```
pub fn data_bytes(data: u32) -> impl Iterator<Item = u8> {
    let significant = (32 - data.leading_zeros()).div_ceil(8).max(1) as usize;
    data.to_le_bytes().into_iter().take(significant)
}
