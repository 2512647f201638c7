//! Fully-Associative Cache with LRU replacement.
//!
//! Any line may hold any block; the tag is the full block number. Lookups
//! compare the tag against every line. Recency is tracked by an
//! [`LruTracker`] whose tag set always equals the set of valid line tags.
//!
//! Stores are handled per byte: each byte's address is the request address
//! plus its position, so a multi-byte store crossing a block boundary touches
//! (and may allocate) two blocks. A newly allocated line is filled from
//! backing memory before the byte is stored.
//!
//! Line selection on a read-miss import is governed by [`ImportPolicy`]:
//! with `EvictAlways` the LRU tail is evicted even while unused lines
//! remain, and a free line is used only when nothing is resident yet.

use super::policies::LruTracker;
use super::{cost, store_through, CacheLine, CacheModel, Response};
use crate::common::{data_bytes, AddressLayout, Diagnostic, Request, INVALID_DATA};
use crate::config::{CacheConfig, ImportPolicy};
use crate::memory::BackingMemory;
use crate::stats::RunCounters;

/// Fully-associative cache state.
pub struct FullyAssociativeCache {
    config: CacheConfig,
    layout: AddressLayout,
    lines: Vec<CacheLine>,
    lru: LruTracker,
    counters: RunCounters,
}

impl FullyAssociativeCache {
    /// Creates an empty cache with the geometry in `config`.
    pub fn new(config: &CacheConfig) -> Self {
        let layout = AddressLayout::new(config.lines, config.line_size);
        let lines = vec![CacheLine::new(layout.line_size()); config.lines as usize];
        Self {
            config: config.clone(),
            layout,
            lines,
            lru: LruTracker::with_capacity(config.lines as usize),
            counters: RunCounters::default(),
        }
    }

    /// Address layout used for lookups.
    pub fn layout(&self) -> AddressLayout {
        self.layout
    }

    /// Returns the line at `slot`.
    pub fn line(&self, slot: usize) -> Option<&CacheLine> {
        self.lines.get(slot)
    }

    /// Recency state, most recently used first.
    pub fn lru(&self) -> &LruTracker {
        &self.lru
    }

    /// Returns `true` if every line holds a block.
    pub fn is_full(&self) -> bool {
        self.lines.iter().all(|line| line.valid)
    }

    fn read(&mut self, addr: u32, memory: &BackingMemory) -> Response {
        self.counters.charge(cost::TAG_DECODE);
        let tag = self.layout.block_tag(addr);
        let offset = self.layout.offset(addr);

        if let Some(slot) = self.find(tag) {
            self.counters.charge(cost::BYTE_MOVE);
            self.promote(tag);
            self.counters.hits += 1;
            return Response::hit(self.lines[slot].bytes[offset]);
        }

        self.counters.misses += 1;
        if !memory.contains(addr) {
            let diagnostic = Diagnostic::DataUnavailable { address: addr };
            log::warn!("{}: {}", self.name(), diagnostic);
            self.counters.unavailable_reads += 1;
            return Response::miss(INVALID_DATA, Some(diagnostic));
        }

        let slot = self.allocate(self.config.import_policy);
        self.import(slot, tag, addr, memory);
        self.promote(tag);
        Response::miss(u32::from(self.lines[slot].bytes[offset]), None)
    }

    fn write(&mut self, addr: u32, data: u32, memory: &BackingMemory) {
        for (i, byte) in data_bytes(data).enumerate() {
            let byte_addr = addr.wrapping_add(i as u32);
            self.counters.charge(cost::TAG_DECODE);
            let tag = self.layout.block_tag(byte_addr);
            let offset = self.layout.offset(byte_addr);

            let slot = match self.find(tag) {
                Some(slot) => slot,
                None => {
                    let slot = self.allocate(ImportPolicy::FillFree);
                    self.import(slot, tag, byte_addr, memory);
                    slot
                }
            };
            self.lines[slot].bytes[offset] = byte;
            self.counters.charge(cost::BYTE_MOVE);
            self.promote(tag);
        }
    }

    /// Copies the block containing `addr` from memory into line `slot`.
    fn import(&mut self, slot: usize, tag: u32, addr: u32, memory: &BackingMemory) {
        let block = memory.read_block(self.layout.block_base(addr), self.layout.line_size());
        self.counters
            .charge(cost::IMPORT_SETUP + cost::BYTE_MOVE * block.len() as u64);
        self.lines[slot].fill(tag, &block);
    }

    /// Scans all lines for `tag`, charging one comparison per line visited.
    fn find(&mut self, tag: u32) -> Option<usize> {
        for (slot, line) in self.lines.iter().enumerate() {
            self.counters.charge(cost::TAG_COMPARE);
            if line.holds(tag) {
                return Some(slot);
            }
        }
        None
    }

    /// Picks the line that receives a new block.
    fn allocate(&mut self, policy: ImportPolicy) -> usize {
        let slot = match policy {
            ImportPolicy::EvictAlways => self.evict().or_else(|| self.free_line()),
            ImportPolicy::FillFree => self.free_line().or_else(|| self.evict()),
        };
        // Validated geometries have at least one line, so one of the two
        // always succeeds.
        debug_assert!(slot.is_some(), "no free or evictable line");
        slot.unwrap_or(0)
    }

    fn free_line(&self) -> Option<usize> {
        self.lines.iter().position(|line| !line.valid)
    }

    /// Drops the LRU tail from the recency list and returns its line.
    fn evict(&mut self) -> Option<usize> {
        let victim = self.lru.pop_lru()?;
        self.counters.charge(cost::LRU_EVICT);
        log::debug!("{}: evict tag {:#x}", self.name(), victim);
        self.lines.iter().position(|line| line.holds(victim))
    }

    fn promote(&mut self, tag: u32) {
        self.lru.touch(tag);
        self.counters.charge(cost::LRU_UPDATE);
    }
}

impl CacheModel for FullyAssociativeCache {
    fn name(&self) -> &str {
        "fully-associative"
    }

    fn process(&mut self, request: &Request, memory: &mut BackingMemory) -> Response {
        self.counters.requests_issued += 1;
        let response = if request.is_write {
            store_through(request, memory, &mut self.counters);
            self.write(request.address, request.data, memory);
            Response::stored(None)
        } else {
            self.read(request.address, memory)
        };
        self.counters.cycles += 1;
        response
    }

    fn counters(&self) -> &RunCounters {
        &self.counters
    }

    fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn resident_tags(&self) -> Vec<u32> {
        self.lines
            .iter()
            .filter(|line| line.valid)
            .map(|line| line.tag)
            .collect()
    }
}
