//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the request type fed to the caches, address
//! decomposition helpers, and the error and diagnostic types shared by the
//! configuration boundary and the simulation core.

/// Address decomposition (tag, index, offset).
pub mod addr;

/// Memory request types and byte splitting.
pub mod data;

/// Error and diagnostic types.
pub mod error;

pub use addr::AddressLayout;
pub use data::{data_bytes, AccessType, Request, INVALID_DATA};
pub use error::{Diagnostic, SimError};
