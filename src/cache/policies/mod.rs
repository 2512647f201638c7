//! Cache replacement policies.

/// Least Recently Used tracker (fully-associative organization).
pub mod lru;

pub use self::lru::LruTracker;
