//! Structural cost weights.
//!
//! Every primitive operation a cache performs adds one of these weights to
//! its `structural_cost` counter. The sum is a hardware-complexity proxy,
//! not a timing model. Both organizations charge the same weight for the
//! same primitive so their totals are comparable.

/// Splitting an address into tag, index and offset.
pub const TAG_DECODE: u64 = 2;

/// Comparing one line's valid bit and tag against a lookup tag.
pub const TAG_COMPARE: u64 = 20;

/// Moving one byte between a line, the read port or backing memory.
pub const BYTE_MOVE: u64 = 10;

/// Moving a tag to the MRU position of the recency list.
pub const LRU_UPDATE: u64 = 20;

/// Unlinking the LRU tail.
pub const LRU_EVICT: u64 = 1;

/// Wrapping a multi-byte write from one line to the next.
pub const LINE_ADVANCE: u64 = 2;

/// Checking whether a write ran past the last line.
pub const CAPACITY_CHECK: u64 = 1;

/// Setting up a block transfer from backing memory.
pub const IMPORT_SETUP: u64 = 4;
