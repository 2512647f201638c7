//! Cycle-level Cache Simulator Library.
//!
//! This crate simulates two cache organizations driven by a fixed sequence
//! of memory read/write requests and reports cycles, hits, misses and a
//! structural cost metric per run.
//!
//! # Architecture
//!
//! * **Caches**: Direct-mapped and fully-associative with LRU replacement.
//! * **Memory**: Sparse byte-addressable backing store, written on every store.
//! * **Driver**: Logical clock feeding one request per tick to the active cache.
//!
//! # Modules
//!
//! * `cache`: Cache organizations, replacement policy and cost weights.
//! * `common`: Shared types, address arithmetic and error handling.
//! * `config`: Configuration loading and validation.
//! * `memory`: Backing memory.
//! * `sim`: Driver, request loader and trace output.
//! * `stats`: Run counters and result reporting.

/// Cache organizations behind a common request-processing interface.
///
/// Implements direct-mapped and fully-associative caches, the LRU recency
/// tracker, and the weights used for structural cost accounting.
pub mod cache;

/// Shared types, address decomposition, and error handling.
pub mod common;

/// Configuration system for cache geometry, timing and run settings.
///
/// Loads TOML configuration files and validates them before a run starts.
pub mod config;

/// Sparse backing memory shared by the cache models.
pub mod memory;

/// Simulation harness: request loading, the clock-driven driver and tracing.
pub mod sim;

/// Run counters and result reporting.
pub mod stats;
