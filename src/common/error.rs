//! Errors and Diagnostics.
//!
//! Two families of problems exist in a simulation:
//!
//! * [`SimError`] - boundary failures (bad configuration, unreadable or
//!   malformed request files). These prevent a run from starting.
//! * [`Diagnostic`] - anomalies observed while a request is processed. They
//!   are recorded and logged but never unwind the run.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Non-fatal condition raised while processing a single request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A direct-mapped write ran past the last line. The cache holds only
    /// the first `written` of `total` bytes; backing memory holds all of them.
    CapacityExceeded {
        /// Address of the write request.
        address: u32,
        /// Bytes that made it into the cache.
        written: usize,
        /// Bytes in the stored value.
        total: usize,
    },

    /// A read missed and the address was never written to backing memory.
    DataUnavailable {
        /// Address of the read request.
        address: u32,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::CapacityExceeded {
                address,
                written,
                total,
            } => write!(
                f,
                "CapacityExceeded at {:#010x}: cached {} of {} bytes",
                address, written, total
            ),
            Diagnostic::DataUnavailable { address } => {
                write!(f, "DataUnavailable at {:#010x}: not in cache or memory", address)
            }
        }
    }
}

/// Error raised at the configuration or input boundary.
#[derive(Debug)]
pub enum SimError {
    /// A configuration value is out of range.
    InvalidConfiguration(String),

    /// A request line could not be parsed.
    Parse {
        /// 1-based line number in the request file.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// A file could not be read or written.
    Io {
        /// Path of the file involved.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A configuration file is not valid TOML for [`crate::config::Config`].
    Config(toml::de::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidConfiguration(msg) => write!(f, "InvalidConfiguration: {}", msg),
            SimError::Parse { line, message } => {
                write!(f, "Invalid request in line {}: {}", line, message)
            }
            SimError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            SimError::Config(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io { source, .. } => Some(source),
            SimError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for SimError {
    fn from(e: toml::de::Error) -> Self {
        SimError::Config(e)
    }
}
