//! Simulation harness: request loading, the clock-driven driver and the
//! per-cycle trace.

/// Clock-driven driver.
pub mod driver;

/// Request file loader.
pub mod loader;

/// Per-cycle signal trace.
pub mod trace;

pub use driver::{RunState, Simulation};
pub use trace::{TraceRecord, TraceSink, VcdWriter};
