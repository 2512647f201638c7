//! Cache organizations.
//!
//! Both organizations implement [`CacheModel`], the single interface the
//! driver talks to. One call to [`CacheModel::process`] is one clock tick of
//! work: the cache performs exactly one read or write, updates its own
//! counters and returns what a read port would show.
//!
//! * [`DirectMappedCache`]: one home line per address, overwrite in place.
//! * [`FullyAssociativeCache`]: any line holds any block, LRU replacement.

/// Structural cost weights.
pub mod cost;

/// Direct-mapped organization.
pub mod direct_mapped;

/// Fully-associative organization with LRU replacement.
pub mod fully_associative;

/// Cache line storage.
pub mod line;

/// Replacement policies.
pub mod policies;

pub use self::direct_mapped::DirectMappedCache;
pub use self::fully_associative::FullyAssociativeCache;
pub use self::line::CacheLine;

use crate::common::{Diagnostic, Request};
use crate::config::{CacheConfig, Organization};
use crate::memory::BackingMemory;
use crate::stats::RunCounters;

/// Classification of a processed request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Read found the block resident.
    Hit,
    /// Read did not find the block resident.
    Miss,
    /// Write stored to backing memory (and, as far as it fit, the cache).
    Stored,
}

/// What a cache reports after one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub outcome: Outcome,
    /// Byte delivered by a read, or `INVALID_DATA`. `None` for writes.
    pub read_data: Option<u32>,
    /// Non-fatal condition raised by this request.
    pub diagnostic: Option<Diagnostic>,
}

impl Response {
    pub(crate) fn hit(byte: u8) -> Self {
        Self {
            outcome: Outcome::Hit,
            read_data: Some(u32::from(byte)),
            diagnostic: None,
        }
    }

    pub(crate) fn miss(read_data: u32, diagnostic: Option<Diagnostic>) -> Self {
        Self {
            outcome: Outcome::Miss,
            read_data: Some(read_data),
            diagnostic,
        }
    }

    pub(crate) fn stored(diagnostic: Option<Diagnostic>) -> Self {
        Self {
            outcome: Outcome::Stored,
            read_data: None,
            diagnostic,
        }
    }

    /// Returns `true` for a read hit.
    pub fn is_hit(&self) -> bool {
        self.outcome == Outcome::Hit
    }
}

/// Interface shared by all cache organizations.
pub trait CacheModel {
    /// Returns the user-friendly name of the organization.
    fn name(&self) -> &str;

    /// Performs one request against the cache and `memory`.
    ///
    /// Writes go to `memory` first and then into the cache. Reads consult
    /// `memory` only on a miss. Each call advances the organization's cycle
    /// and issued-request counters by exactly one.
    fn process(&mut self, request: &Request, memory: &mut BackingMemory) -> Response;

    /// Counters accumulated so far.
    fn counters(&self) -> &RunCounters;

    /// Geometry and timing the cache was built with.
    fn config(&self) -> &CacheConfig;

    /// Tags of all valid lines, in line order.
    fn resident_tags(&self) -> Vec<u32>;
}

/// Builds the cache for `organization`.
pub fn build(organization: Organization, config: &CacheConfig) -> Box<dyn CacheModel> {
    match organization {
        Organization::DirectMapped => Box::new(DirectMappedCache::new(config)),
        Organization::FullyAssociative => Box::new(FullyAssociativeCache::new(config)),
    }
}

/// Writes a store request through to backing memory, charging one byte
/// move per byte stored. Returns the number of bytes in the value.
pub(crate) fn store_through(
    request: &Request,
    memory: &mut BackingMemory,
    counters: &mut RunCounters,
) -> usize {
    let written = memory.write(request.address, request.data);
    counters.charge(cost::BYTE_MOVE * written as u64);
    written
}
