//! Direct-Mapped Cache.
//!
//! Every address has exactly one home line, selected by the index bits.
//! A miss simply overwrites the home line, so no replacement state exists.
//!
//! Multi-byte stores are laid out byte by byte starting at the home line and
//! offset; when a line fills up the store continues at offset 0 of the next
//! line. A store that would run past the last line is cut short there. The
//! full value is always in backing memory, so the truncation only costs
//! future hits.
//!
//! A line that receives a block it does not hold yet is filled from backing
//! memory first, on reads and writes alike.

use super::{cost, store_through, CacheLine, CacheModel, Response};
use crate::common::{data_bytes, AddressLayout, Diagnostic, Request, INVALID_DATA};
use crate::config::CacheConfig;
use crate::memory::BackingMemory;
use crate::stats::RunCounters;

/// Direct-mapped cache state.
pub struct DirectMappedCache {
    config: CacheConfig,
    layout: AddressLayout,
    lines: Vec<CacheLine>,
    counters: RunCounters,
}

impl DirectMappedCache {
    /// Creates an empty cache with the geometry in `config`.
    pub fn new(config: &CacheConfig) -> Self {
        let layout = AddressLayout::new(config.lines, config.line_size);
        let lines = vec![CacheLine::new(layout.line_size()); config.lines as usize];
        Self {
            config: config.clone(),
            layout,
            lines,
            counters: RunCounters::default(),
        }
    }

    /// Address layout used for lookups.
    pub fn layout(&self) -> AddressLayout {
        self.layout
    }

    /// Returns the line at `index`.
    pub fn line(&self, index: usize) -> Option<&CacheLine> {
        self.lines.get(index)
    }

    fn read(&mut self, addr: u32, memory: &BackingMemory) -> Response {
        self.counters.charge(cost::TAG_DECODE);
        let index = self.layout.index(addr);
        let offset = self.layout.offset(addr);
        let tag = self.layout.direct_tag(addr);

        self.counters.charge(cost::TAG_COMPARE);
        let line = &self.lines[index];
        if line.holds(tag) {
            self.counters.charge(cost::BYTE_MOVE);
            self.counters.hits += 1;
            return Response::hit(line.bytes[offset]);
        }

        self.counters.misses += 1;
        if !memory.contains(addr) {
            let diagnostic = Diagnostic::DataUnavailable { address: addr };
            log::warn!("{}: {}", self.name(), diagnostic);
            self.counters.unavailable_reads += 1;
            return Response::miss(INVALID_DATA, Some(diagnostic));
        }

        self.import(index, tag, addr, memory);
        Response::miss(u32::from(self.lines[index].bytes[offset]), None)
    }

    fn write(
        &mut self,
        addr: u32,
        data: u32,
        total: usize,
        memory: &BackingMemory,
    ) -> Option<Diagnostic> {
        self.counters.charge(cost::TAG_DECODE);
        let tag = self.layout.direct_tag(addr);
        let line_size = self.layout.line_size();
        let mut index = self.layout.index(addr);
        let mut offset = self.layout.offset(addr);

        for (written, byte) in data_bytes(data).enumerate() {
            if offset == line_size {
                offset = 0;
                index += 1;
                self.counters.charge(cost::LINE_ADVANCE);
            }

            self.counters.charge(cost::CAPACITY_CHECK);
            if index >= self.lines.len() {
                let diagnostic = Diagnostic::CapacityExceeded {
                    address: addr,
                    written,
                    total,
                };
                log::warn!("{}: {}", self.name(), diagnostic);
                self.counters.capacity_truncations += 1;
                return Some(diagnostic);
            }

            if !self.lines[index].holds(tag) {
                self.import(index, tag, addr.wrapping_add(written as u32), memory);
            }
            self.lines[index].bytes[offset] = byte;
            self.counters.charge(cost::BYTE_MOVE);
            offset += 1;
        }
        None
    }

    /// Copies the block containing `addr` from memory into line `index`.
    fn import(&mut self, index: usize, tag: u32, addr: u32, memory: &BackingMemory) {
        let block = memory.read_block(self.layout.block_base(addr), self.layout.line_size());
        self.counters
            .charge(cost::IMPORT_SETUP + cost::BYTE_MOVE * block.len() as u64);
        self.lines[index].fill(tag, &block);
    }
}

impl CacheModel for DirectMappedCache {
    fn name(&self) -> &str {
        "direct-mapped"
    }

    fn process(&mut self, request: &Request, memory: &mut BackingMemory) -> Response {
        self.counters.requests_issued += 1;
        let response = if request.is_write {
            let total = store_through(request, memory, &mut self.counters);
            Response::stored(self.write(request.address, request.data, total, memory))
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
