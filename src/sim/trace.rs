//! Per-cycle Signal Trace.
//!
//! The driver hands one [`TraceRecord`] per tick to an attached
//! [`TraceSink`]. [`VcdWriter`] renders the records as a Value Change Dump
//! so the run can be inspected in any waveform viewer.

use crate::common::SimError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Signal values of the active organization after one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraceRecord {
    /// Tick number, starting at 0.
    pub tick: u64,
    pub address: u32,
    pub wdata: u32,
    /// Last value on the read port. Holds its value across writes.
    pub rdata: u32,
    pub we: bool,
    pub cycles: u64,
    pub hits: u64,
    pub misses: u64,
    pub structural_cost: u64,
    pub requests_issued: u64,
}

/// Consumer of per-tick trace records.
pub trait TraceSink {
    /// Appends the record for one tick.
    fn record(&mut self, record: &TraceRecord) -> io::Result<()>;

    /// Flushes and finalizes the trace. Called once when the run ends.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// VCD identifier, name and bit width of every traced signal.
///
/// Identifiers never start with `$`, which VCD reserves for keywords.
const SIGNALS: [(&str, &str, u32); 10] = [
    (CLK, "clk", 1),
    (ADDRESS, "address", 32),
    (WDATA, "wdata", 32),
    (RDATA, "rdata", 32),
    (WE, "we", 1),
    (CYCLES, "cycles", 64),
    (HITS, "hits", 64),
    (MISSES, "misses", 64),
    (COST, "cost", 64),
    (RQ, "rq", 64),
];

const CLK: &str = "!";
const ADDRESS: &str = "\"";
const WDATA: &str = "#";
const RDATA: &str = "%";
const WE: &str = "&";
const CYCLES: &str = "'";
const HITS: &str = "(";
const MISSES: &str = ")";
const COST: &str = "*";
const RQ: &str = "+";

/// Writes trace records in Value Change Dump format.
///
/// Each tick spans two time units: the rising clock edge carries every
/// signal's value, the falling edge only the clock.
pub struct VcdWriter<W: Write> {
    out: W,
}

impl VcdWriter<BufWriter<File>> {
    /// Creates a VCD file at `path`.
    pub fn create(path: &Path) -> Result<Self, SimError> {
        let io_err = |source| SimError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_err)?;
        Self::new(BufWriter::new(file)).map_err(io_err)
    }
}

impl<W: Write> VcdWriter<W> {
    /// Wraps `out` and writes the VCD header.
    pub fn new(mut out: W) -> io::Result<Self> {
        writeln!(out, "$timescale 1 ns $end")?;
        writeln!(out, "$scope module cache_sim $end")?;
        for (id, name, width) in SIGNALS {
            writeln!(out, "$var wire {} {} {} $end", width, id, name)?;
        }
        writeln!(out, "$upscope $end")?;
        writeln!(out, "$enddefinitions $end")?;
        Ok(Self { out })
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn vector(&mut self, id: &str, value: u64) -> io::Result<()> {
        writeln!(self.out, "b{:b} {}", value, id)
    }
}

impl<W: Write> TraceSink for VcdWriter<W> {
    fn record(&mut self, r: &TraceRecord) -> io::Result<()> {
        writeln!(self.out, "#{}", r.tick * 2)?;
        writeln!(self.out, "1{}", CLK)?;
        self.vector(ADDRESS, u64::from(r.address))?;
        self.vector(WDATA, u64::from(r.wdata))?;
        self.vector(RDATA, u64::from(r.rdata))?;
        writeln!(self.out, "{}{}", u8::from(r.we), WE)?;
        self.vector(CYCLES, r.cycles)?;
        self.vector(HITS, r.hits)?;
        self.vector(MISSES, r.misses)?;
        self.vector(COST, r.structural_cost)?;
        self.vector(RQ, r.requests_issued)?;
        writeln!(self.out, "#{}", r.tick * 2 + 1)?;
        writeln!(self.out, "0{}", CLK)
    }

    fn close(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
