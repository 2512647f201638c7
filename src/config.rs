//! Configuration system for the cache simulator.
//!
//! This module defines the configuration bundle that parameterizes a run:
//! 1. **Defaults:** Baseline geometry, latencies and cycle budget.
//! 2. **Structures:** `simulation` (driver) and `cache` (geometry) sections.
//! 3. **Validation:** Rejects geometries the simulation core cannot model.
//!
//! Configuration is read from TOML; every field is optional and falls back
//! to the defaults below. The command line may override individual values.

use crate::common::SimError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration constants for the simulator.
mod defaults {
    /// Cycle budget for a run.
    pub const CYCLES: i64 = 3000;

    /// Number of cache lines.
    pub const LINES: u32 = 256;

    /// Bytes per cache line.
    pub const LINE_SIZE: u32 = 32;

    /// Cache access latency in cycles.
    pub const LINE_LATENCY: u32 = 1;

    /// Backing memory latency in cycles.
    pub const MEMORY_LATENCY: u32 = 5;

    /// Largest total cache capacity (lines times line size) in bytes.
    /// Line storage is allocated up front.
    pub const MAX_CACHE_BYTES: u64 = 1 << 30;
}

/// Cache organization selected for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum Organization {
    /// One home line per address.
    #[default]
    DirectMapped,
    /// Any line holds any block; LRU replacement.
    FullyAssociative,
}

impl Organization {
    /// Returns the organization a comparison run uses.
    pub fn other(self) -> Self {
        match self {
            Organization::DirectMapped => Organization::FullyAssociative,
            Organization::FullyAssociative => Organization::DirectMapped,
        }
    }
}

/// Line selection of the fully-associative cache when a read miss imports
/// a block from backing memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum ImportPolicy {
    /// Always evict the LRU tail and reuse its slot, even while unused lines
    /// remain. A free line is taken only when nothing is resident.
    #[default]
    EvictAlways,
    /// Take the first unused line; evict the LRU tail only when full.
    FillFree,
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Driver settings.
#[derive(Clone, Debug, Deserialize)]
pub struct SimulationConfig {
    /// Clock ticks allowed before the run is declared incomplete.
    #[serde(default = "default_cycles")]
    pub cycles: i64,

    #[serde(default)]
    pub organization: Organization,

    /// VCD trace output. No trace is written when absent.
    #[serde(default)]
    pub trace_file: Option<PathBuf>,

    /// Also drive the other organization with the same requests.
    #[serde(default)]
    pub compare: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cycles: default_cycles(),
            organization: Organization::default(),
            trace_file: None,
            compare: false,
        }
    }
}

/// Cache geometry and timing.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_lines")]
    pub lines: u32,

    #[serde(default = "default_line_size")]
    pub line_size: u32,

    /// Accepted for forward compatibility; does not change tick cost.
    #[serde(default = "default_line_latency")]
    pub line_latency: u32,

    /// Accepted for forward compatibility; does not change tick cost.
    #[serde(default = "default_memory_latency")]
    pub memory_latency: u32,

    #[serde(default)]
    pub import_policy: ImportPolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            lines: default_lines(),
            line_size: default_line_size(),
            line_latency: default_line_latency(),
            memory_latency: default_memory_latency(),
            import_policy: ImportPolicy::default(),
        }
    }
}

impl Config {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, SimError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks the configuration before a run starts.
    ///
    /// # Errors
    ///
    /// `SimError::InvalidConfiguration` if the cycle budget is negative, or if
    /// the line count or line size is zero or not a power of two, or if the
    /// total capacity exceeds 1 GiB.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.simulation.cycles < 0 {
            return Err(SimError::InvalidConfiguration(format!(
                "cycles must be >= 0, got {}",
                self.simulation.cycles
            )));
        }
        if !self.cache.lines.is_power_of_two() {
            return Err(SimError::InvalidConfiguration(format!(
                "cache lines must be a power of two, got {}",
                self.cache.lines
            )));
        }
        if !self.cache.line_size.is_power_of_two() {
            return Err(SimError::InvalidConfiguration(format!(
                "cache line size must be a power of two, got {}",
                self.cache.line_size
            )));
        }
        let capacity = u64::from(self.cache.lines) * u64::from(self.cache.line_size);
        if capacity > defaults::MAX_CACHE_BYTES {
            return Err(SimError::InvalidConfiguration(format!(
                "cache capacity must be <= {} bytes, got {} lines of {} bytes",
                defaults::MAX_CACHE_BYTES,
                self.cache.lines,
                self.cache.line_size
            )));
        }
        Ok(())
    }

    /// Cycle budget as an unsigned tick count. Negative budgets clamp to 0;
    /// `validate` rejects them before this matters.
    pub fn cycle_budget(&self) -> u64 {
        u64::try_from(self.simulation.cycles).unwrap_or(0)
    }
}

fn default_cycles() -> i64 {
    defaults::CYCLES
}

fn default_lines() -> u32 {
    defaults::LINES
}

fn default_line_size() -> u32 {
    defaults::LINE_SIZE
}

fn default_line_latency() -> u32 {
    defaults::LINE_LATENCY
}

fn default_memory_latency() -> u32 {
    defaults::MEMORY_LATENCY
}
